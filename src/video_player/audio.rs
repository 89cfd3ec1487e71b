// SPDX-License-Identifier: MPL-2.0
//! Audio decoding for the video element.
//!
//! The audio stream is demuxed from its own input context on a Tokio
//! blocking thread, resampled to the output device format and sent back as
//! interleaved `f32` buffers, slightly ahead of when they are heard.

use super::audio_output::{AudioOutputConfig, AudioSamples};
use super::decoder::{init_ffmpeg, DecoderCommand};
use crate::error::{Error, Result, VideoError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Upper bound on frames skipped while landing a seek, for corrupt files or
/// targets past the end.
const MAX_SEEK_FRAMES: u32 = 1000;

/// Buffers are queued this long before they play.
const AUDIO_LOOKAHEAD_SECS: f64 = 0.2;

/// A decoded buffer in the output device format.
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub samples: AudioSamples,
}

/// Events sent from the audio decoder.
#[derive(Debug, Clone)]
pub enum AudioDecoderEvent {
    BufferReady(DecodedAudio),
    EndOfStream,
    Error(VideoError),
}

/// Commands sent to the audio decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioDecoderCommand {
    Play,
    Pause,
    Seek { target_secs: f64 },
    Stop,
}

impl AudioDecoderCommand {
    /// Decoding side of an element command. Mute is handled by the output.
    pub fn from_element(command: &DecoderCommand) -> Option<Self> {
        match command {
            DecoderCommand::Play => Some(Self::Play),
            DecoderCommand::Pause => Some(Self::Pause),
            DecoderCommand::Seek { target_secs } => Some(Self::Seek {
                target_secs: *target_secs,
            }),
            DecoderCommand::Stop => Some(Self::Stop),
            DecoderCommand::SetMuted(_) => None,
        }
    }
}

struct AudioDecoderState {
    is_playing: bool,
    playback_start_time: Option<Instant>,
    first_pts: Option<f64>,
    /// Frames ending before this are dropped after a seek.
    seek_target_secs: Option<f64>,
    seek_frames_skipped: u32,
}

impl AudioDecoderState {
    fn new() -> Self {
        Self {
            is_playing: false,
            playback_start_time: None,
            first_pts: None,
            seek_target_secs: None,
            seek_frames_skipped: 0,
        }
    }

    fn reset_timing(&mut self) {
        self.playback_start_time = Some(Instant::now());
        self.first_pts = None;
    }

    /// Applies a command. Returns `false` when the loop should end.
    fn handle_command(
        &mut self,
        command: AudioDecoderCommand,
        ictx: &mut ffmpeg_next::format::context::Input,
        decoder: &mut ffmpeg_next::decoder::Audio,
        event_tx: &mpsc::Sender<AudioDecoderEvent>,
    ) -> bool {
        match command {
            AudioDecoderCommand::Play => {
                self.is_playing = true;
                self.reset_timing();
            }
            AudioDecoderCommand::Pause => {
                self.is_playing = false;
                self.playback_start_time = None;
                self.first_pts = None;
            }
            AudioDecoderCommand::Seek { target_secs } => {
                let target_secs = target_secs.max(0.0);
                let timestamp = (target_secs * 1_000_000.0) as i64;
                if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                    let _ = event_tx.blocking_send(AudioDecoderEvent::Error(
                        VideoError::DecodingFailed(format!("Audio seek failed: {e}")),
                    ));
                    self.seek_target_secs = None;
                } else {
                    decoder.flush();
                    self.reset_timing();
                    self.seek_target_secs = Some(target_secs);
                    self.seek_frames_skipped = 0;
                }
            }
            AudioDecoderCommand::Stop => return false,
        }
        true
    }
}

/// Handle on an audio decoder running in a Tokio blocking task.
pub struct AudioDecoder {
    command_tx: mpsc::UnboundedSender<AudioDecoderCommand>,
    event_rx: mpsc::Receiver<AudioDecoderEvent>,
}

impl AudioDecoder {
    /// Spawns the decode loop, resampling to `output`.
    ///
    /// Returns `None` when the file has no audio stream.
    pub fn new<P: AsRef<Path>>(video_path: P, output: AudioOutputConfig) -> Result<Option<Self>> {
        let path = video_path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(VideoError::IoError(format!("Video file not found: {:?}", path)).into());
        }

        if !Self::has_audio_stream(&path)? {
            return Ok(None);
        }

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(4);

        tokio::task::spawn_blocking(move || {
            let error_tx = event_tx.clone();
            if let Err(e) = Self::decoder_loop(path, command_rx, event_tx, output) {
                tracing::warn!(error = %e, "audio decoder task failed");
                let _ = error_tx.blocking_send(AudioDecoderEvent::Error(e.into_video_error()));
            }
        });

        Ok(Some(Self {
            command_tx,
            event_rx,
        }))
    }

    fn has_audio_stream(path: &Path) -> Result<bool> {
        init_ffmpeg()?;
        let ictx = ffmpeg_next::format::input(path)?;
        Ok(ictx
            .streams()
            .best(ffmpeg_next::media::Type::Audio)
            .is_some())
    }

    pub fn send_command(&self, command: AudioDecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| VideoError::Disconnected.into())
    }

    pub async fn recv_event(&mut self) -> Option<AudioDecoderEvent> {
        self.event_rx.recv().await
    }

    fn decoder_loop(
        video_path: PathBuf,
        mut command_rx: mpsc::UnboundedReceiver<AudioDecoderCommand>,
        event_tx: mpsc::Sender<AudioDecoderEvent>,
        output: AudioOutputConfig,
    ) -> Result<()> {
        init_ffmpeg()?;

        let mut ictx = ffmpeg_next::format::input(&video_path)?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Audio)
            .ok_or_else(|| Error::Io("No audio stream found".to_string()))?;
        let audio_stream_index = input.index();

        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())?;
        let mut decoder = context_decoder.decoder().audio()?;

        let source_layout = if decoder.channel_layout().is_empty() {
            ffmpeg_next::ChannelLayout::default(i32::from(decoder.channels()))
        } else {
            decoder.channel_layout()
        };
        // Anything beyond mono is downmixed to stereo
        let (output_layout, output_channels) = match output.channels {
            1 => (ffmpeg_next::ChannelLayout::MONO, 1u16),
            _ => (ffmpeg_next::ChannelLayout::STEREO, 2u16),
        };

        let mut resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            source_layout,
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Packed),
            output_layout,
            output.sample_rate,
        )?;

        tracing::debug!(
            path = %video_path.display(),
            source_rate = decoder.rate(),
            output_rate = output.sample_rate,
            output_channels,
            "audio stream opened"
        );

        let mut state = AudioDecoderState::new();

        loop {
            match command_rx.try_recv() {
                Ok(command) => {
                    if !state.handle_command(command, &mut ictx, &mut decoder, &event_tx) {
                        break;
                    }
                }
                Err(mpsc::error::TryRecvError::Disconnected) => break,
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !state.is_playing {
                std::thread::sleep(Duration::from_millis(10));
                continue;
            }

            let mut frame_decoded = false;
            for (stream, packet) in ictx.packets() {
                if stream.index() != audio_stream_index {
                    continue;
                }

                if let Err(e) = decoder.send_packet(&packet) {
                    let _ = event_tx.blocking_send(AudioDecoderEvent::Error(
                        VideoError::DecodingFailed(format!("Audio packet failed: {e}")),
                    ));
                    continue;
                }

                let mut decoded_frame = ffmpeg_next::frame::Audio::empty();
                if decoder.receive_frame(&mut decoded_frame).is_err() {
                    continue;
                }

                let mut resampled = ffmpeg_next::frame::Audio::empty();
                if let Err(e) = resampler.run(&decoded_frame, &mut resampled) {
                    let _ = event_tx.blocking_send(AudioDecoderEvent::Error(
                        VideoError::DecodingFailed(format!("Resampling failed: {e}")),
                    ));
                    continue;
                }

                let samples = extract_samples(&resampled, output_channels);
                let pts_secs = decoded_frame
                    .timestamp()
                    .map_or(0.0, |pts| pts as f64 * time_base_f64);
                let frame_duration = samples.len() as f64
                    / (f64::from(output.sample_rate) * f64::from(output_channels));

                // Drop whatever ends before the seek target
                if let Some(target) = state.seek_target_secs {
                    if pts_secs + frame_duration < target {
                        state.seek_frames_skipped += 1;
                        if state.seek_frames_skipped >= MAX_SEEK_FRAMES {
                            tracing::debug!(target, "audio seek gave up before target");
                            state.seek_target_secs = None;
                        }
                        continue;
                    }
                    state.first_pts = Some(target);
                    state.seek_target_secs = None;
                }

                if let Some(start_time) = state.playback_start_time {
                    let first = *state.first_pts.get_or_insert(pts_secs);
                    let delay = pts_secs - first - AUDIO_LOOKAHEAD_SECS;
                    if delay > 0.0 {
                        let target_time = start_time + Duration::from_secs_f64(delay);
                        let now = Instant::now();
                        if target_time > now {
                            std::thread::sleep(target_time - now);
                        }
                    }
                }

                let audio = DecodedAudio {
                    samples: Arc::new(samples),
                };
                if event_tx
                    .blocking_send(AudioDecoderEvent::BufferReady(audio))
                    .is_err()
                {
                    return Ok(());
                }

                frame_decoded = true;
                break;
            }

            if !frame_decoded {
                let _ = event_tx.blocking_send(AudioDecoderEvent::EndOfStream);
                state.is_playing = false;
            }
        }

        Ok(())
    }
}

/// Reads packed f32 samples out of a resampled frame.
fn extract_samples(frame: &ffmpeg_next::frame::Audio, channels: u16) -> Vec<f32> {
    let data = frame.data(0);
    let sample_count = frame.samples() * usize::from(channels);

    data.chunks_exact(4)
        .take(sample_count)
        .map(|bytes| f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OUTPUT: AudioOutputConfig = AudioOutputConfig {
        sample_rate: 48_000,
        channels: 2,
    };

    #[test]
    fn element_commands_map_to_decoder_commands() {
        assert_eq!(
            AudioDecoderCommand::from_element(&DecoderCommand::Play),
            Some(AudioDecoderCommand::Play)
        );
        assert_eq!(
            AudioDecoderCommand::from_element(&DecoderCommand::Seek { target_secs: 2.5 }),
            Some(AudioDecoderCommand::Seek { target_secs: 2.5 })
        );
        assert_eq!(
            AudioDecoderCommand::from_element(&DecoderCommand::Stop),
            Some(AudioDecoderCommand::Stop)
        );
    }

    #[test]
    fn mute_stays_with_the_output() {
        assert_eq!(
            AudioDecoderCommand::from_element(&DecoderCommand::SetMuted(true)),
            None
        );
    }

    #[tokio::test]
    async fn audio_decoder_fails_for_nonexistent_file() {
        let result = AudioDecoder::new("/nonexistent/video.mp4", OUTPUT);
        assert!(matches!(
            result,
            Err(Error::Video(VideoError::IoError(_)))
        ));
    }

    #[tokio::test]
    async fn audio_decoder_rejects_garbage_without_panicking() {
        let temp_dir = tempfile::tempdir().unwrap();
        let video_path = temp_dir.path().join("garbage.mp4");
        std::fs::write(&video_path, b"fake video data without audio").unwrap();

        // Unreadable containers fail; readable ones without audio give None
        match AudioDecoder::new(&video_path, OUTPUT) {
            Ok(None) | Err(_) => {}
            Ok(Some(_)) => panic!("garbage should not expose an audio stream"),
        }
    }
}
