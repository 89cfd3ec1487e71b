// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Video(VideoError),
}

/// Classified failures reported by the video element.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoError {
    /// Codec is not available in the system's FFmpeg build.
    UnsupportedCodec(String),

    /// Source opened but contains no video stream.
    NoVideoStream,

    /// Source appears corrupted.
    CorruptedFile,

    /// Decoding failed during playback.
    DecodingFailed(String),

    /// Source missing or unreadable.
    IoError(String),

    /// The decoder task is gone and can no longer take commands.
    Disconnected,

    /// Anything not matched above, raw message kept.
    Other(String),
}

impl VideoError {
    /// Whether the element cannot play the source at all after this error.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            VideoError::UnsupportedCodec(_)
                | VideoError::NoVideoStream
                | VideoError::CorruptedFile
                | VideoError::IoError(_)
        )
    }

    /// Categorizes a raw FFmpeg/decoder message.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        // Codec errors first, they may also contain "not found"
        if msg_lower.contains("codec") || msg_lower.contains("decoder") {
            if let Some(codec) = Self::extract_codec_name(&msg_lower) {
                return VideoError::UnsupportedCodec(codec);
            } else if msg_lower.contains("not found") || msg_lower.contains("unsupported") {
                return VideoError::DecodingFailed(msg.to_string());
            }
        }

        if msg_lower.contains("no such file")
            || msg_lower.contains("not found")
            || msg_lower.contains("permission denied")
            || msg_lower.contains("i/o error")
        {
            return VideoError::IoError(msg.to_string());
        }

        if msg_lower.contains("no video stream") || msg_lower.contains("invalid data found") {
            return VideoError::NoVideoStream;
        }

        if msg_lower.contains("corrupt")
            || msg_lower.contains("invalid")
            || msg_lower.contains("malformed")
        {
            return VideoError::CorruptedFile;
        }

        if msg_lower.contains("packet")
            || msg_lower.contains("scaling")
            || msg_lower.contains("seek")
            || msg_lower.contains("decode")
        {
            return VideoError::DecodingFailed(msg.to_string());
        }

        VideoError::Other(msg.to_string())
    }

    fn extract_codec_name(msg: &str) -> Option<String> {
        let codecs = ["h264", "hevc", "h265", "vp8", "vp9", "av1", "mpeg4", "mpeg2"];
        codecs
            .iter()
            .find(|codec| msg.contains(*codec))
            .map(|codec| codec.to_uppercase())
    }
}

impl fmt::Display for VideoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VideoError::UnsupportedCodec(codec) => write!(f, "Unsupported video codec: {}", codec),
            VideoError::NoVideoStream => write!(f, "No video stream found"),
            VideoError::CorruptedFile => write!(f, "Video file is corrupted"),
            VideoError::DecodingFailed(msg) => write!(f, "Decoding failed: {}", msg),
            VideoError::IoError(msg) => write!(f, "I/O error: {}", msg),
            VideoError::Disconnected => write!(f, "Video decoder is not running"),
            VideoError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Video(e) => write!(f, "Video Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Narrows any error to what the video element reports.
    pub fn into_video_error(self) -> VideoError {
        match self {
            Error::Video(err) => err,
            Error::Io(msg) => VideoError::IoError(msg),
            Error::Config(msg) => VideoError::Other(msg),
        }
    }
}

impl From<VideoError> for Error {
    fn from(err: VideoError) -> Self {
        Error::Video(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<ffmpeg_next::Error> for Error {
    fn from(err: ffmpeg_next::Error) -> Self {
        Error::Video(VideoError::from_message(&err.to_string()))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn video_error_from_message_io() {
        let err = VideoError::from_message("No such file or directory");
        assert!(matches!(err, VideoError::IoError(_)));
    }

    #[test]
    fn video_error_from_message_no_stream() {
        let err = VideoError::from_message("No video stream found in file");
        assert_eq!(err, VideoError::NoVideoStream);
    }

    #[test]
    fn video_error_from_message_codec() {
        let err = VideoError::from_message("Decoder h264 not found");
        assert_eq!(err, VideoError::UnsupportedCodec("H264".to_string()));
    }

    #[test]
    fn video_error_from_message_corrupted() {
        let err = VideoError::from_message("File is corrupt");
        assert_eq!(err, VideoError::CorruptedFile);
    }

    #[test]
    fn video_error_from_message_decoding() {
        let err = VideoError::from_message("Packet send failed: error");
        assert!(matches!(err, VideoError::DecodingFailed(_)));
    }

    #[test]
    fn video_error_from_message_falls_back_to_other() {
        let err = VideoError::from_message("something odd happened");
        assert_eq!(err, VideoError::Other("something odd happened".to_string()));
    }

    #[test]
    fn source_level_errors_are_fatal() {
        assert!(VideoError::NoVideoStream.is_fatal());
        assert!(VideoError::from_message("Decoder hevc not found").is_fatal());
        assert!(!VideoError::DecodingFailed("Seek failed".into()).is_fatal());
        assert!(!VideoError::Disconnected.is_fatal());
    }

    #[test]
    fn into_video_error_keeps_classification() {
        let err: Error = VideoError::CorruptedFile.into();
        assert_eq!(err.into_video_error(), VideoError::CorruptedFile);
        assert!(matches!(
            Error::Io("gone".into()).into_video_error(),
            VideoError::IoError(msg) if msg == "gone"
        ));
    }

    #[test]
    fn disconnected_wraps_into_video_variant() {
        let err: Error = VideoError::Disconnected.into();
        assert_eq!(format!("{}", err), "Video Error: Video decoder is not running");
    }
}
