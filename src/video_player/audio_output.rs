// SPDX-License-Identifier: MPL-2.0
//! Audio output using cpal.
//!
//! Decoded samples are queued in a bounded buffer that the device callback
//! drains. Mute and pause are atomics read on every callback, so toggling
//! them takes effect within one device period.

use crate::error::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Interleaved f32 samples normalized to [-1.0, 1.0].
pub type AudioSamples = Arc<Vec<f32>>;

/// Format of the output device. Decoded audio is resampled to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioOutputConfig {
    pub sample_rate: u32,
    pub channels: u16,
}

/// Commands for controlling audio output.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioOutputCommand {
    /// Queue samples for playback.
    Play(AudioSamples),

    Pause,

    Resume,

    /// Discard queued samples, keep the pause state.
    ClearBuffer,

    /// Silence output while still consuming samples.
    SetMuted(bool),

    /// Discard queued samples and pause.
    Stop,
}

/// Destination of the element's audio.
pub trait AudioSink {
    fn send_command(&self, command: AudioOutputCommand) -> Result<()>;
}

/// State shared between the player and the device callback.
#[derive(Debug)]
struct OutputBuffer {
    samples: Mutex<Vec<f32>>,
    /// Queued samples beyond this are dropped.
    capacity: usize,
    muted: AtomicBool,
    paused: AtomicBool,
}

impl OutputBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            samples: Mutex::new(Vec::with_capacity(capacity)),
            capacity,
            muted: AtomicBool::new(false),
            paused: AtomicBool::new(false),
        }
    }

    fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Relaxed)
    }

    fn apply(&self, command: AudioOutputCommand) {
        match command {
            AudioOutputCommand::Play(samples) => {
                if let Ok(mut buf) = self.samples.lock() {
                    let room = self.capacity.saturating_sub(buf.len());
                    buf.extend_from_slice(&samples[..samples.len().min(room)]);
                }
            }
            AudioOutputCommand::Pause => self.paused.store(true, Ordering::Relaxed),
            AudioOutputCommand::Resume => self.paused.store(false, Ordering::Relaxed),
            AudioOutputCommand::ClearBuffer => self.clear(),
            AudioOutputCommand::SetMuted(muted) => self.muted.store(muted, Ordering::Relaxed),
            AudioOutputCommand::Stop => {
                self.clear();
                self.paused.store(true, Ordering::Relaxed);
            }
        }
    }

    fn clear(&self) {
        if let Ok(mut buf) = self.samples.lock() {
            buf.clear();
        }
    }

    /// Fills one device period.
    ///
    /// Paused output keeps its queue. Muted output consumes the queue and
    /// writes silence, so unmuting resumes in step with the video.
    fn fill<T: cpal::SizedSample + cpal::FromSample<f32>>(&self, data: &mut [T]) {
        let silence = T::from_sample(0.0f32);

        if self.is_paused() {
            data.fill(silence);
            return;
        }

        let Ok(mut buf) = self.samples.lock() else {
            data.fill(silence);
            return;
        };

        let consumed = data.len().min(buf.len());
        if self.is_muted() {
            data.fill(silence);
        } else {
            for (out, sample) in data.iter_mut().zip(buf.iter()) {
                // Just below 1.0, i16 conversion overflows at exactly 1.0
                *out = T::from_sample(sample.clamp(-1.0, 0.999_999_9));
            }
            data[consumed..].fill(silence);
        }
        buf.drain(..consumed);
    }

    #[cfg(test)]
    fn queued(&self) -> usize {
        self.samples.lock().map(|buf| buf.len()).unwrap_or(0)
    }
}

/// Playback through the system's default output device.
pub struct AudioOutput {
    buffer: Arc<OutputBuffer>,
    config: AudioOutputConfig,

    /// Kept alive for playback to continue.
    _stream: cpal::Stream,
}

impl AudioOutput {
    /// Opens the default output device and starts its stream.
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Io("No audio output device found".to_string()))?;

        let supported_config = device
            .default_output_config()
            .map_err(|e| Error::Io(format!("Failed to get audio config: {e}")))?;

        let config = AudioOutputConfig {
            sample_rate: supported_config.sample_rate(),
            channels: supported_config.channels(),
        };

        // About one second of audio
        let capacity = config.sample_rate as usize * usize::from(config.channels);
        let buffer = Arc::new(OutputBuffer::new(capacity));

        let stream_config = supported_config.config();
        let stream = match supported_config.sample_format() {
            cpal::SampleFormat::F32 => {
                Self::build_stream::<f32>(&device, &stream_config, Arc::clone(&buffer))?
            }
            cpal::SampleFormat::I16 => {
                Self::build_stream::<i16>(&device, &stream_config, Arc::clone(&buffer))?
            }
            cpal::SampleFormat::U16 => {
                Self::build_stream::<u16>(&device, &stream_config, Arc::clone(&buffer))?
            }
            format => {
                return Err(Error::Io(format!(
                    "Unsupported audio sample format: {format:?}"
                )))
            }
        };

        stream
            .play()
            .map_err(|e| Error::Io(format!("Failed to start audio stream: {e}")))?;

        tracing::debug!(
            sample_rate = config.sample_rate,
            channels = config.channels,
            "audio output opened"
        );

        Ok(Self {
            buffer,
            config,
            _stream: stream,
        })
    }

    fn build_stream<T: cpal::SizedSample + cpal::FromSample<f32>>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        buffer: Arc<OutputBuffer>,
    ) -> Result<cpal::Stream> {
        device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| buffer.fill(data),
                |err| tracing::warn!(error = %err, "audio output error"),
                None,
            )
            .map_err(|e| Error::Io(format!("Failed to build audio stream: {e}")))
    }

    /// Format decoded audio must be converted to.
    pub fn config(&self) -> AudioOutputConfig {
        self.config
    }
}

impl AudioSink for AudioOutput {
    fn send_command(&self, command: AudioOutputCommand) -> Result<()> {
        self.buffer.apply(command);
        Ok(())
    }
}

impl fmt::Debug for AudioOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioOutput")
            .field("config", &self.config)
            .field("muted", &self.buffer.is_muted())
            .field("paused", &self.buffer.is_paused())
            .finish()
    }
}
