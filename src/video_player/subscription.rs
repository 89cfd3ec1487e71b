// SPDX-License-Identifier: MPL-2.0
//! Iced subscription connecting the decoders to the UI event loop.
//!
//! One session runs the video decoder and, when the file has an audio track
//! and an output device is available, an audio decoder feeding a cpal
//! output. Surface commands arrive on a single channel and are fanned out
//! to whichever side handles them.

use super::audio::{AudioDecoder, AudioDecoderCommand, AudioDecoderEvent};
use super::audio_output::{AudioOutput, AudioOutputCommand, AudioSink};
use super::decoder::{AsyncDecoder, DecoderCommand, DecoderConfig, DecoderEvent};
use super::handle::DecoderCommandSender;
use super::progress::ProgressEvent;
use crate::error::VideoError;
use iced::futures::{SinkExt, Stream};
use iced::stream;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Identity and inputs of one playback session.
///
/// Each surface gets its own `session_id`, so the subscription is recreated
/// when a new surface plays the same file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaybackSession {
    pub session_id: u64,
    pub video_path: PathBuf,
    pub config: DecoderConfig,
}

/// Messages emitted by the video element.
#[derive(Debug, Clone)]
pub enum PlaybackMessage {
    /// The element is running; commands go through this handle.
    Started(DecoderCommandSender),

    /// A new frame is ready for display.
    FrameReady {
        rgba_data: Arc<Vec<u8>>,
        width: u32,
        height: u32,
    },

    /// Periodic position report.
    Progress(ProgressEvent),

    /// Playback reached the end.
    EndOfStream,

    Error(VideoError),
}

impl From<DecoderEvent> for PlaybackMessage {
    fn from(event: DecoderEvent) -> Self {
        match event {
            DecoderEvent::FrameReady(frame) => PlaybackMessage::FrameReady {
                rgba_data: frame.rgba_data,
                width: frame.width,
                height: frame.height,
            },
            DecoderEvent::Progress(progress) => PlaybackMessage::Progress(progress),
            DecoderEvent::EndOfStream => PlaybackMessage::EndOfStream,
            DecoderEvent::Error(error) => PlaybackMessage::Error(error),
        }
    }
}

/// Audio side of a session, absent for silent files or without a device.
struct AudioPath {
    decoder: AudioDecoder,
    output: AudioOutput,
}

impl AudioPath {
    fn open(session: &PlaybackSession) -> Option<Self> {
        let output = match AudioOutput::new() {
            Ok(output) => output,
            Err(error) => {
                tracing::debug!(%error, "no audio output, playing video only");
                return None;
            }
        };

        match AudioDecoder::new(&session.video_path, output.config()) {
            Ok(Some(decoder)) => Some(Self { decoder, output }),
            Ok(None) => None,
            Err(error) => {
                tracing::warn!(%error, "audio decoder failed, playing video only");
                None
            }
        }
    }

    fn apply(&self, command: &DecoderCommand) {
        if let Some(audio_command) = AudioDecoderCommand::from_element(command) {
            if let Err(error) = self.decoder.send_command(audio_command) {
                tracing::debug!(%error, "audio decoder gone");
            }
        }
        forward_to_sink(command, &self.output);
    }

    fn on_event(&self, event: AudioDecoderEvent) {
        match event {
            AudioDecoderEvent::BufferReady(audio) => {
                let _ = self
                    .output
                    .send_command(AudioOutputCommand::Play(audio.samples));
            }
            AudioDecoderEvent::EndOfStream => tracing::debug!("audio reached the end"),
            AudioDecoderEvent::Error(error) => tracing::warn!(%error, "audio playback error"),
        }
    }
}

/// Output side of an element command.
fn output_command(command: &DecoderCommand) -> AudioOutputCommand {
    match command {
        DecoderCommand::Play => AudioOutputCommand::Resume,
        DecoderCommand::Pause => AudioOutputCommand::Pause,
        DecoderCommand::Seek { .. } => AudioOutputCommand::ClearBuffer,
        DecoderCommand::SetMuted(muted) => AudioOutputCommand::SetMuted(*muted),
        DecoderCommand::Stop => AudioOutputCommand::Stop,
    }
}

fn forward_to_sink(command: &DecoderCommand, sink: &impl AudioSink) {
    if let Err(error) = sink.send_command(output_command(command)) {
        tracing::debug!(%error, "audio output rejected command");
    }
}

enum State {
    Idle,
    Playing {
        video: AsyncDecoder,
        audio: Option<AudioPath>,
        commands: mpsc::UnboundedReceiver<DecoderCommand>,
    },
}

/// Creates the video element subscription for `video_path`.
///
/// The first message is `Started` with the command handle, or `Error` if
/// the decoder could not be spawned.
pub fn video_playback(
    video_path: PathBuf,
    session_id: u64,
    config: DecoderConfig,
) -> iced::Subscription<PlaybackMessage> {
    iced::Subscription::run_with(
        PlaybackSession {
            session_id,
            video_path,
            config,
        },
        playback_stream,
    )
}

fn playback_stream(session: &PlaybackSession) -> impl Stream<Item = PlaybackMessage> {
    let session = session.clone();

    stream::channel(100, move |mut output| async move {
        let mut state = State::Idle;

        loop {
            match &mut state {
                State::Idle => {
                    let video = match AsyncDecoder::new(&session.video_path, session.config) {
                        Ok(decoder) => decoder,
                        Err(e) => {
                            let _ = output
                                .send(PlaybackMessage::Error(e.into_video_error()))
                                .await;
                            break;
                        }
                    };
                    let audio = AudioPath::open(&session);
                    tracing::debug!(
                        session_id = session.session_id,
                        has_audio = audio.is_some(),
                        "video element starting"
                    );

                    let (command_tx, commands) = mpsc::unbounded_channel();
                    let sender = DecoderCommandSender::new(command_tx);
                    let _ = output.send(PlaybackMessage::Started(sender)).await;

                    state = State::Playing {
                        video,
                        audio,
                        commands,
                    };
                }

                State::Playing {
                    video,
                    audio,
                    commands,
                } => {
                    tokio::select! {
                        command = commands.recv() => {
                            // The surface dropped its handle
                            let command = command.unwrap_or(DecoderCommand::Stop);
                            let stopping = command == DecoderCommand::Stop;

                            if let Some(audio) = audio.as_ref() {
                                audio.apply(&command);
                            }
                            let forward = match command {
                                DecoderCommand::SetMuted(_) => Ok(()),
                                command => video.send_command(command),
                            };
                            if let Err(e) = forward {
                                let _ = output
                                    .send(PlaybackMessage::Error(e.into_video_error()))
                                    .await;
                            }

                            if stopping {
                                tracing::debug!(session_id = session.session_id, "video element stopped");
                                break;
                            }
                        }

                        event = video.recv_event() => match event {
                            Some(event) => {
                                let _ = output.send(PlaybackMessage::from(event)).await;
                            }
                            None => {
                                tracing::debug!(session_id = session.session_id, "video decoder ended");
                                break;
                            }
                        },

                        Some(event) = async {
                            match audio.as_mut() {
                                Some(audio) => audio.decoder.recv_event().await,
                                None => std::future::pending().await,
                            }
                        } => {
                            if let Some(audio) = audio.as_ref() {
                                audio.on_event(event);
                            }
                        }
                    }
                }
            }
        }

        // Keep subscription alive but idle
        std::future::pending::<()>().await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::video_player::decoder::DecodedFrame;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        commands: Mutex<Vec<AudioOutputCommand>>,
    }

    impl AudioSink for RecordingSink {
        fn send_command(&self, command: AudioOutputCommand) -> Result<()> {
            self.commands.lock().unwrap().push(command);
            Ok(())
        }
    }

    #[test]
    fn mute_reaches_the_audio_sink() {
        let sink = RecordingSink::default();
        forward_to_sink(&DecoderCommand::SetMuted(true), &sink);
        forward_to_sink(&DecoderCommand::SetMuted(false), &sink);

        assert_eq!(
            *sink.commands.lock().unwrap(),
            vec![
                AudioOutputCommand::SetMuted(true),
                AudioOutputCommand::SetMuted(false)
            ]
        );
    }

    #[test]
    fn transport_commands_map_to_output_commands() {
        assert_eq!(output_command(&DecoderCommand::Play), AudioOutputCommand::Resume);
        assert_eq!(output_command(&DecoderCommand::Pause), AudioOutputCommand::Pause);
        assert_eq!(
            output_command(&DecoderCommand::Seek { target_secs: 3.0 }),
            AudioOutputCommand::ClearBuffer
        );
        assert_eq!(output_command(&DecoderCommand::Stop), AudioOutputCommand::Stop);
    }

    #[test]
    fn sessions_differ_by_id() {
        let session = |session_id| PlaybackSession {
            session_id,
            video_path: PathBuf::from("clip.mp4"),
            config: DecoderConfig::default(),
        };
        assert_eq!(session(42), session(42));
        assert_ne!(session(42), session(43));
    }

    #[test]
    fn decoder_events_map_to_messages() {
        let progress = ProgressEvent {
            current_time: 3.0,
            playable_duration: 10.0,
            seekable_duration: 10.0,
        };
        assert!(matches!(
            PlaybackMessage::from(DecoderEvent::Progress(progress)),
            PlaybackMessage::Progress(p) if p == progress
        ));

        let frame = DecodedFrame {
            rgba_data: Arc::new(vec![0u8; 16]),
            width: 2,
            height: 2,
        };
        assert!(matches!(
            PlaybackMessage::from(DecoderEvent::FrameReady(frame)),
            PlaybackMessage::FrameReady { width: 2, height: 2, .. }
        ));

        assert!(matches!(
            PlaybackMessage::from(DecoderEvent::EndOfStream),
            PlaybackMessage::EndOfStream
        ));
    }

    #[test]
    fn decoder_errors_keep_their_category() {
        assert!(matches!(
            PlaybackMessage::from(DecoderEvent::Error(VideoError::NoVideoStream)),
            PlaybackMessage::Error(VideoError::NoVideoStream)
        ));
    }

    #[test]
    fn subscription_can_be_built() {
        let _ = video_playback(PathBuf::from("clip.mp4"), 7, DecoderConfig::default());
    }
}
