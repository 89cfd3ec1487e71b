// SPDX-License-Identifier: MPL-2.0
//! The video element behind the player surface.
//!
//! FFmpeg decodes video and audio on Tokio blocking tasks and cpal plays the
//! audio; the surface only sees a [`VideoHandle`] for commands and a stream
//! of [`PlaybackMessage`]s.

mod audio;
mod audio_output;
mod decoder;
mod handle;
pub mod progress;
pub mod subscription;

pub use decoder::{init_ffmpeg, AsyncDecoder, DecodedFrame, DecoderCommand, DecoderConfig, DecoderEvent};
pub use handle::{DecoderCommandSender, VideoHandle};
pub use progress::{DurationInfo, ProgressEvent, DURATION_SENTINEL};
pub use subscription::{video_playback, PlaybackMessage, PlaybackSession};
