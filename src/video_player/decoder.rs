// SPDX-License-Identifier: MPL-2.0
//! Async video frame decoder using FFmpeg.
//!
//! The decode loop runs on a Tokio blocking thread and talks to the UI
//! through two channels: unbounded commands in, bounded events out.

use super::progress::ProgressEvent;
use crate::error::{Error, Result, VideoError};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// FFmpeg seeks and reports container duration in `AV_TIME_BASE` units.
const AV_TIME_BASE: f64 = 1_000_000.0;

static FFMPEG_INIT: Once = Once::new();

/// Initializes FFmpeg once per process and quiets its logging.
pub fn init_ffmpeg() -> Result<()> {
    let mut init_result: Result<()> = Ok(());

    FFMPEG_INIT.call_once(|| {
        if let Err(e) = ffmpeg_next::init() {
            init_result = Err(Error::Io(format!("FFmpeg initialization failed: {e}")));
            return;
        }

        // SAFETY: av_log_set_level is thread-safe and only affects logging
        unsafe {
            ffmpeg_next::ffi::av_log_set_level(ffmpeg_next::ffi::AV_LOG_ERROR);
        }
    });

    init_result
}

/// A decoded video frame ready for display.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// RGBA pixel data (width × height × 4 bytes).
    pub rgba_data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
}

/// Commands sent to the decoder task.
#[derive(Debug, Clone, PartialEq)]
pub enum DecoderCommand {
    /// Start or resume decoding.
    Play,

    /// Stop sending frames, keep position.
    Pause,

    /// Jump to a timestamp. While paused, one frame is decoded at the target.
    Seek { target_secs: f64 },

    /// Mute input of the element, applied by the audio output.
    SetMuted(bool),

    /// Stop decoding and release resources.
    Stop,
}

/// Events sent from the decoder to the UI.
#[derive(Debug, Clone)]
pub enum DecoderEvent {
    FrameReady(DecodedFrame),

    /// Playback position and duration bounds.
    Progress(ProgressEvent),

    EndOfStream,

    Error(VideoError),
}

/// Decoder tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecoderConfig {
    /// Minimum time between two progress events while playing.
    pub progress_interval: Duration,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            progress_interval: Duration::from_millis(u64::from(
                crate::config::DEFAULT_PROGRESS_INTERVAL_MS,
            )),
        }
    }
}

/// Handle on a decoder running in a Tokio blocking task.
pub struct AsyncDecoder {
    command_tx: mpsc::UnboundedSender<DecoderCommand>,

    /// Bounded so frames cannot pile up during rapid seeks.
    event_rx: mpsc::Receiver<DecoderEvent>,
}

impl AsyncDecoder {
    /// Spawns the decode loop for the given file.
    ///
    /// Fails early if the file does not exist; every later failure is
    /// reported as a [`DecoderEvent::Error`].
    pub fn new<P: AsRef<Path>>(video_path: P, config: DecoderConfig) -> Result<Self> {
        let path = video_path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(VideoError::IoError(format!("Video file not found: {:?}", path)).into());
        }

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel(2);

        // FFmpeg types are not Send, the whole loop lives on one blocking thread
        tokio::task::spawn_blocking(move || {
            let error_tx = event_tx.clone();
            if let Err(e) = Self::decoder_loop_blocking(path, command_rx, event_tx, config) {
                tracing::warn!(error = %e, "decoder task failed");
                let _ = error_tx.blocking_send(DecoderEvent::Error(e.into_video_error()));
            }
        });

        Ok(Self {
            command_tx,
            event_rx,
        })
    }

    pub fn send_command(&self, command: DecoderCommand) -> Result<()> {
        self.command_tx
            .send(command)
            .map_err(|_| VideoError::Disconnected.into())
    }

    /// Receives the next event, `None` once the decoder task has ended.
    pub async fn recv_event(&mut self) -> Option<DecoderEvent> {
        self.event_rx.recv().await
    }

    fn decoder_loop_blocking(
        video_path: PathBuf,
        mut command_rx: mpsc::UnboundedReceiver<DecoderCommand>,
        event_tx: mpsc::Sender<DecoderEvent>,
        config: DecoderConfig,
    ) -> Result<()> {
        init_ffmpeg()?;

        let mut ictx = ffmpeg_next::format::input(&video_path)?;

        let input = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or(VideoError::NoVideoStream)?;
        let video_stream_index = input.index();

        let time_base = input.time_base();
        let time_base_f64 = f64::from(time_base.numerator()) / f64::from(time_base.denominator());

        let duration_secs = if ictx.duration() > 0 {
            ictx.duration() as f64 / AV_TIME_BASE
        } else {
            (input.duration().max(0) as f64) * time_base_f64
        };

        let context_decoder =
            ffmpeg_next::codec::context::Context::from_parameters(input.parameters())?;
        let mut decoder = context_decoder.decoder().video()?;

        let width = decoder.width();
        let height = decoder.height();

        let mut scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGBA,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )?;

        tracing::debug!(
            path = %video_path.display(),
            width,
            height,
            duration_secs,
            "video element opened"
        );

        let progress_for = |current_time: f64| ProgressEvent {
            current_time,
            playable_duration: duration_secs,
            seekable_duration: duration_secs,
        };

        let mut is_playing = false;
        let mut playback_start_time: Option<Instant> = None;
        let mut first_pts: Option<f64> = None;
        let mut current_pts_secs: f64 = 0.0;
        let mut last_progress: Option<Instant> = None;
        // Show the first frame even when starting paused
        let mut decode_single_frame = true;
        // Packets are exhausted and the decoder is flushing its last frames
        let mut draining = false;

        loop {
            match command_rx.try_recv() {
                Ok(DecoderCommand::Play) => {
                    if !is_playing && current_pts_secs > 0.0 {
                        let timestamp = (current_pts_secs * AV_TIME_BASE) as i64;
                        // RangeTo lets FFmpeg land on the previous keyframe
                        if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                            send_error(&event_tx, format!("Resume seek failed: {e}"));
                        } else {
                            decoder.flush();
                            draining = false;
                        }
                    }
                    is_playing = true;
                    playback_start_time = Some(Instant::now());
                    first_pts = None;
                }
                Ok(DecoderCommand::Pause) => {
                    is_playing = false;
                    playback_start_time = None;
                    first_pts = None;
                }
                Ok(DecoderCommand::Seek { target_secs }) => {
                    let target_secs = target_secs.max(0.0);
                    let timestamp = (target_secs * AV_TIME_BASE) as i64;
                    if let Err(e) = ictx.seek(timestamp, ..timestamp) {
                        send_error(&event_tx, format!("Seek failed: {e}"));
                    } else {
                        decoder.flush();
                        draining = false;
                        current_pts_secs = target_secs;
                        playback_start_time = Some(Instant::now());
                        first_pts = None;
                        // Report the new position right away
                        last_progress = None;
                        if !is_playing {
                            decode_single_frame = true;
                        }
                    }
                }
                // Audio only
                Ok(DecoderCommand::SetMuted(_)) => {}
                Ok(DecoderCommand::Stop) | Err(mpsc::error::TryRecvError::Disconnected) => {
                    break;
                }
                Err(mpsc::error::TryRecvError::Empty) => {}
            }

            if !is_playing && !decode_single_frame {
                std::thread::sleep(Duration::from_millis(10));
                continue;
            }

            let mut decoded_frame = ffmpeg_next::frame::Video::empty();
            let frame_decoded = next_frame(
                &mut ictx,
                &mut decoder,
                video_stream_index,
                &mut draining,
                &event_tx,
                &mut decoded_frame,
            );

            if !frame_decoded {
                let _ = event_tx.blocking_send(DecoderEvent::Progress(progress_for(duration_secs)));
                let _ = event_tx.blocking_send(DecoderEvent::EndOfStream);
                is_playing = false;
                playback_start_time = None;
                first_pts = None;
                decode_single_frame = false;
                continue;
            }

            let mut rgb_frame = ffmpeg_next::frame::Video::empty();
            if let Err(e) = scaler.run(&decoded_frame, &mut rgb_frame) {
                send_error(&event_tx, format!("Scaling failed: {e}"));
                continue;
            }

            let rgba_data = extract_rgba_data(&rgb_frame);

            let pts_secs = decoded_frame
                .timestamp()
                .map_or(current_pts_secs, |pts| pts as f64 * time_base_f64);

            // Frame pacing relative to the first frame after (re)start
            if is_playing {
                if let Some(start_time) = playback_start_time {
                    let first = *first_pts.get_or_insert(pts_secs);
                    let frame_delay = (pts_secs - first).max(0.0);
                    let target_time = start_time + Duration::from_secs_f64(frame_delay);
                    let now = Instant::now();
                    if target_time > now {
                        std::thread::sleep(target_time - now);
                    }
                }
            }

            current_pts_secs = pts_secs;

            let decoded = DecodedFrame {
                rgba_data: Arc::new(rgba_data),
                width,
                height,
            };

            if event_tx
                .blocking_send(DecoderEvent::FrameReady(decoded))
                .is_err()
            {
                return Ok(());
            }

            let progress_due = decode_single_frame
                || last_progress.is_none_or(|last| last.elapsed() >= config.progress_interval);
            if progress_due {
                last_progress = Some(Instant::now());
                if event_tx
                    .blocking_send(DecoderEvent::Progress(progress_for(pts_secs)))
                    .is_err()
                {
                    return Ok(());
                }
            }

            decode_single_frame = false;
        }

        Ok(())
    }
}

/// Pulls the next decoded frame into `frame`.
///
/// Frames already buffered in the decoder come first, then packets are fed
/// until one yields a frame. Once the input runs out the decoder is put in
/// draining mode so its delayed frames still come out. Returns `false` when
/// nothing is left.
fn next_frame(
    ictx: &mut ffmpeg_next::format::context::Input,
    decoder: &mut ffmpeg_next::decoder::Video,
    stream_index: usize,
    draining: &mut bool,
    event_tx: &mpsc::Sender<DecoderEvent>,
    frame: &mut ffmpeg_next::frame::Video,
) -> bool {
    if decoder.receive_frame(frame).is_ok() {
        return true;
    }
    if *draining {
        return false;
    }

    for (stream, packet) in ictx.packets() {
        if stream.index() != stream_index {
            continue;
        }
        if let Err(e) = decoder.send_packet(&packet) {
            send_error(event_tx, format!("Packet send failed: {e}"));
            continue;
        }
        if decoder.receive_frame(frame).is_ok() {
            return true;
        }
    }

    *draining = true;
    if let Err(e) = decoder.send_eof() {
        tracing::debug!(error = %e, "decoder refused end of input");
        return false;
    }
    decoder.receive_frame(frame).is_ok()
}

/// Reports a recoverable decode failure to the UI.
fn send_error(event_tx: &mpsc::Sender<DecoderEvent>, message: String) {
    let _ = event_tx.blocking_send(DecoderEvent::Error(VideoError::DecodingFailed(message)));
}

/// Copies RGBA rows out of a frame, dropping stride padding.
fn extract_rgba_data(frame: &ffmpeg_next::frame::Video) -> Vec<u8> {
    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let data = frame.data(0);
    let stride = frame.stride(0);

    let mut rgba_bytes = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        let row_start = y * stride;
        rgba_bytes.extend_from_slice(&data[row_start..row_start + width * 4]);
    }
    rgba_bytes
}
