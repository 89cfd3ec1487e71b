// SPDX-License-Identifier: MPL-2.0
//! Video player surface: the frame, two animated overlay panels and the
//! local state that drives the video element.
//!
//! The surface never talks to the decoder directly. It keeps the element's
//! declarative inputs (`paused`, `muted`, pending seek) and pushes them
//! through a [`VideoHandle`] once the element reports that it started.

pub mod overlay;

use crate::config::Config;
use crate::ui::animation::OverlayAnimation;
use crate::ui::styles;
use crate::ui::widgets::{scrub_bar, ScrubBar, VideoCanvas};
use crate::video_player::{
    video_playback, DecoderConfig, DurationInfo, PlaybackMessage, ProgressEvent, VideoHandle,
};
use iced::widget::{container, mouse_area, Stack};
use iced::{window, Element, Length, Subscription};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Inputs given by the parent when the surface is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Props {
    /// Media to play.
    pub source: PathBuf,
    /// Initial playback state.
    pub paused: bool,
    /// Not drawn by the surface.
    pub title: Option<String>,
}

/// Declarative inputs of the video element.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoProps<'a> {
    pub paused: bool,
    pub source: &'a Path,
    pub muted: bool,
    pub current_playback_time: f64,
}

#[derive(Debug, Clone)]
pub enum Message {
    /// Click anywhere on the surface not taken by a control.
    SurfaceTapped,
    TogglePlayback,
    ToggleMute,
    ScrubBar(scrub_bar::Message),
    Fullscreen,
    Back,
    Options,
    Playback(PlaybackMessage),
    AnimationFrame(Instant),
    /// Width available to the surface changed.
    Resized(f32),
}

/// Side effects the application should perform after handling a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    ToggleFullscreen,
    Back,
    OpenOptions,
}

/// Width and height of the 16:9 box for an available width.
#[must_use]
pub fn player_size(width: f32) -> (f32, f32) {
    (width, width * 9.0 / 16.0)
}

pub struct State {
    source: PathBuf,
    paused: bool,
    muted: bool,
    duration: DurationInfo,
    current_time: f64,
    /// Seek waiting for a handle. Starts at the beginning of the media.
    pending_seek: Option<f64>,
    overlay: OverlayAnimation,
    scrub_bar: ScrubBar,
    canvas: VideoCanvas<Message>,
    handle: Option<Box<dyn VideoHandle>>,
    session_id: u64,
    width: f32,
    decoder_config: DecoderConfig,
}

impl State {
    #[must_use]
    pub fn new(props: Props, config: &Config) -> Self {
        Self {
            source: props.source,
            paused: props.paused,
            muted: config.muted(),
            duration: DurationInfo::default(),
            current_time: 0.0,
            pending_seek: Some(0.0),
            overlay: OverlayAnimation::new(config.overlay_params()),
            scrub_bar: ScrubBar::default(),
            canvas: VideoCanvas::new(),
            handle: None,
            session_id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            width: config.player_width(),
            decoder_config: DecoderConfig {
                progress_interval: config.progress_interval(),
            },
        }
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::SurfaceTapped => {
                let visible = self.overlay.toggle();
                tracing::trace!(visible, "overlay toggled");
            }
            Message::TogglePlayback => {
                self.paused = !self.paused;
                let paused = self.paused;
                self.forward("set_paused", |handle| handle.set_paused(paused));
            }
            Message::ToggleMute => {
                self.muted = !self.muted;
                let muted = self.muted;
                self.forward("set_muted", |handle| handle.set_muted(muted));
            }
            Message::ScrubBar(message) => {
                if let Some(target_secs) = self.scrub_bar.update(message) {
                    self.request_seek(target_secs);
                }
            }
            Message::Fullscreen => return Effect::ToggleFullscreen,
            Message::Back => return Effect::Back,
            Message::Options => return Effect::OpenOptions,
            Message::Playback(event) => self.handle_playback(event),
            Message::AnimationFrame(now) => self.overlay.tick(now),
            Message::Resized(width) => self.width = width,
        }
        Effect::None
    }

    fn handle_playback(&mut self, event: PlaybackMessage) {
        match event {
            PlaybackMessage::Started(sender) => {
                tracing::debug!(session_id = self.session_id, ?sender, "video element started");
                self.attach_handle(sender);
            }
            PlaybackMessage::FrameReady {
                rgba_data,
                width,
                height,
            } => self.canvas.set_frame(rgba_data, width, height),
            PlaybackMessage::Progress(progress) => self.on_progress(progress),
            PlaybackMessage::EndOfStream => {
                tracing::debug!(session_id = self.session_id, "end of stream");
            }
            PlaybackMessage::Error(error) if error.is_fatal() => {
                tracing::error!(path = %self.source.display(), %error, "source cannot be played");
            }
            PlaybackMessage::Error(error) => {
                tracing::warn!(path = %self.source.display(), %error, "playback error");
            }
        }
    }

    /// Records a progress report from the element.
    ///
    /// The duration is taken from the first report that arrives while it is
    /// still unknown; the current time follows every report.
    pub fn on_progress(&mut self, event: ProgressEvent) {
        if self.duration.capture(&event) {
            tracing::debug!(
                playable = self.duration.playable_duration,
                seekable = self.duration.seekable_duration,
                "duration captured"
            );
        }
        self.current_time = event.current_time;
    }

    /// Connects the element. Current inputs are pushed, then the pending
    /// seek is flushed.
    pub fn attach_handle(&mut self, handle: impl VideoHandle + 'static) {
        self.handle = Some(Box::new(handle));

        let (paused, muted) = (self.paused, self.muted);
        self.forward("set_paused", |handle| handle.set_paused(paused));
        self.forward("set_muted", |handle| handle.set_muted(muted));
        self.flush_pending_seek();
    }

    /// Queues a seek and sends it right away when a handle exists.
    pub fn request_seek(&mut self, target_secs: f64) {
        self.pending_seek = Some(target_secs);
        self.flush_pending_seek();
    }

    fn flush_pending_seek(&mut self) {
        if self.handle.is_none() {
            return;
        }
        if let Some(target_secs) = self.pending_seek.take() {
            self.forward("seek", |handle| handle.seek(target_secs));
        }
    }

    fn forward(
        &self,
        command: &'static str,
        send: impl FnOnce(&dyn VideoHandle) -> crate::error::Result<()>,
    ) {
        let Some(handle) = self.handle.as_deref() else {
            return;
        };
        if let Err(error) = send(handle) {
            tracing::warn!(command, %error, "video element command failed");
        }
    }

    /// Inputs the video element currently receives.
    pub fn element_props(&self) -> VideoProps<'_> {
        VideoProps {
            paused: self.paused,
            source: &self.source,
            muted: self.muted,
            current_playback_time: self.current_time,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn duration(&self) -> DurationInfo {
        self.duration
    }

    pub fn pending_seek(&self) -> Option<f64> {
        self.pending_seek
    }

    pub fn has_handle(&self) -> bool {
        self.handle.is_some()
    }

    pub fn is_overlay_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    pub fn overlay(&self) -> &OverlayAnimation {
        &self.overlay
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Playback element for the current source, plus frame ticks while the
    /// overlay is moving.
    pub fn subscription(&self) -> Subscription<Message> {
        let playback = video_playback(self.source.clone(), self.session_id, self.decoder_config)
            .map(Message::Playback);

        let frames = if self.overlay.is_animating() {
            window::frames().map(Message::AnimationFrame)
        } else {
            Subscription::none()
        };

        Subscription::batch([playback, frames])
    }

    pub fn view(&self) -> Element<'_, Message> {
        let (width, height) = player_size(self.width);
        let interactive = self.overlay.is_visible();

        let nav = overlay::nav(self.overlay.nav_style(), interactive);
        let footer = overlay::footer(overlay::FooterContext {
            style: self.overlay.footer_style(),
            interactive,
            paused: self.paused,
            muted: self.muted,
            current_time: self.current_time,
            duration: &self.duration,
            scrub_bar: &self.scrub_bar,
        });

        let layers = Stack::new()
            .push(
                container(self.canvas.view())
                    .width(Length::Fill)
                    .height(Length::Fill),
            )
            .push(container(nav).width(Length::Fill).align_top(Length::Fill))
            .push(
                container(footer)
                    .width(Length::Fill)
                    .align_bottom(Length::Fill),
            )
            .width(Length::Fill)
            .height(Length::Fill);

        let surface = container(layers)
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
            .clip(true)
            .style(styles::overlay::surface);

        mouse_area(surface).on_press(Message::SurfaceTapped).into()
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("source", &self.source)
            .field("paused", &self.paused)
            .field("muted", &self.muted)
            .field("duration", &self.duration)
            .field("current_time", &self.current_time)
            .field("pending_seek", &self.pending_seek)
            .field("overlay_visible", &self.overlay.is_visible())
            .field("has_handle", &self.handle.is_some())
            .field("session_id", &self.session_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result, VideoError};
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Seek(f64),
        Paused(bool),
        Muted(bool),
    }

    #[derive(Clone, Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<Call>>>,
        fail: bool,
    }

    impl Recorder {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) -> Result<()> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                Err(Error::Video(VideoError::Disconnected))
            } else {
                Ok(())
            }
        }
    }

    impl VideoHandle for Recorder {
        fn seek(&self, target_secs: f64) -> Result<()> {
            self.record(Call::Seek(target_secs))
        }

        fn set_paused(&self, paused: bool) -> Result<()> {
            self.record(Call::Paused(paused))
        }

        fn set_muted(&self, muted: bool) -> Result<()> {
            self.record(Call::Muted(muted))
        }
    }

    fn state(paused: bool) -> State {
        State::new(
            Props {
                source: PathBuf::from("clip.mp4"),
                paused,
                title: None,
            },
            &Config::default(),
        )
    }

    fn progress(current_time: f64, duration: f64) -> ProgressEvent {
        ProgressEvent {
            current_time,
            playable_duration: duration,
            seekable_duration: duration,
        }
    }

    #[test]
    fn new_state_reflects_props_and_defaults() {
        let state = state(true);
        assert!(state.is_paused());
        assert!(state.is_muted());
        assert_eq!(state.current_time(), 0.0);
        assert!(state.duration().is_unknown());
        assert_eq!(state.pending_seek(), Some(0.0));
        assert!(!state.is_overlay_visible());
        assert!(!state.has_handle());
    }

    #[test]
    fn attach_pushes_inputs_then_seeks_to_start() {
        let mut state = state(true);
        let recorder = Recorder::default();
        state.attach_handle(recorder.clone());

        assert_eq!(
            recorder.calls(),
            vec![Call::Paused(true), Call::Muted(true), Call::Seek(0.0)]
        );
        assert_eq!(state.pending_seek(), None);
    }

    #[test]
    fn seek_before_handle_is_kept() {
        let mut state = state(false);
        state.update(Message::ScrubBar(scrub_bar::Message::Dragged(30.0)));
        state.update(Message::ScrubBar(scrub_bar::Message::Released));
        assert_eq!(state.pending_seek(), Some(30.0));

        let recorder = Recorder::default();
        state.attach_handle(recorder.clone());
        assert_eq!(
            recorder.calls(),
            vec![Call::Paused(false), Call::Muted(true), Call::Seek(30.0)]
        );
    }

    #[test]
    fn every_release_sends_one_seek() {
        let mut state = state(true);
        let recorder = Recorder::default();
        state.attach_handle(recorder.clone());

        for target in [5.0, 6.0, 7.0] {
            state.update(Message::ScrubBar(scrub_bar::Message::Dragged(target)));
            state.update(Message::ScrubBar(scrub_bar::Message::Released));
        }

        let seeks: Vec<_> = recorder
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Seek(_)))
            .collect();
        assert_eq!(
            seeks,
            vec![Call::Seek(0.0), Call::Seek(5.0), Call::Seek(6.0), Call::Seek(7.0)]
        );
    }

    #[test]
    fn dragging_alone_does_not_seek() {
        let mut state = state(true);
        let recorder = Recorder::default();
        state.attach_handle(recorder.clone());
        state.update(Message::ScrubBar(scrub_bar::Message::Dragged(50.0)));

        assert_eq!(recorder.calls().len(), 3);
    }

    #[test]
    fn toggles_forward_to_handle() {
        let mut state = state(true);
        let recorder = Recorder::default();
        state.attach_handle(recorder.clone());

        state.update(Message::TogglePlayback);
        state.update(Message::ToggleMute);

        assert_eq!(
            recorder.calls()[3..],
            [Call::Paused(false), Call::Muted(false)]
        );
        assert!(!state.is_paused());
        assert!(!state.is_muted());
    }

    #[test]
    fn failed_commands_are_logged_and_state_still_toggles() {
        let mut state = state(true);
        let recorder = Recorder {
            fail: true,
            ..Recorder::default()
        };
        state.attach_handle(recorder.clone());
        state.update(Message::TogglePlayback);

        assert!(!state.is_paused());
        assert_eq!(state.pending_seek(), None);
        assert_eq!(recorder.calls().len(), 4);
    }

    #[test]
    fn duration_is_captured_once() {
        let mut state = state(true);
        state.on_progress(progress(12.0, 120.0));
        state.on_progress(progress(13.0, 999.0));

        assert_eq!(state.duration().playable_duration, 120.0);
        assert_eq!(state.duration().seekable_duration, 120.0);
        assert_eq!(state.current_time(), 13.0);
    }

    #[test]
    fn progress_arrives_through_playback_messages() {
        let mut state = state(true);
        let effect = state.update(Message::Playback(PlaybackMessage::Progress(progress(
            4.0, 60.0,
        ))));

        assert_eq!(effect, Effect::None);
        assert_eq!(state.current_time(), 4.0);
        assert_eq!(state.element_props().current_playback_time, 4.0);
    }

    #[test]
    fn tapping_toggles_overlay_only() {
        let mut state = state(true);
        let recorder = Recorder::default();
        state.attach_handle(recorder.clone());

        state.update(Message::SurfaceTapped);
        assert!(state.is_overlay_visible());
        state.update(Message::SurfaceTapped);
        assert!(!state.is_overlay_visible());

        assert!(state.is_paused());
        assert_eq!(recorder.calls().len(), 3);
    }

    #[test]
    fn buttons_map_to_effects() {
        let mut state = state(true);
        assert_eq!(state.update(Message::Fullscreen), Effect::ToggleFullscreen);
        assert_eq!(state.update(Message::Back), Effect::Back);
        assert_eq!(state.update(Message::Options), Effect::OpenOptions);
    }

    #[test]
    fn element_props_mirror_state() {
        let mut state = state(false);
        state.update(Message::ToggleMute);

        assert_eq!(
            state.element_props(),
            VideoProps {
                paused: false,
                source: Path::new("clip.mp4"),
                muted: false,
                current_playback_time: 0.0,
            }
        );
    }

    #[test]
    fn player_size_is_sixteen_by_nine() {
        assert_eq!(player_size(800.0), (800.0, 450.0));
        assert_eq!(player_size(1920.0), (1920.0, 1080.0));
    }

    #[test]
    fn resize_updates_width() {
        let mut state = state(true);
        state.update(Message::Resized(1280.0));
        assert_eq!(state.width(), 1280.0);
    }

    #[test]
    fn playback_errors_are_ignored() {
        let mut state = state(true);
        for error in [
            VideoError::NoVideoStream,
            VideoError::DecodingFailed("bad packet".to_string()),
        ] {
            let effect = state.update(Message::Playback(PlaybackMessage::Error(error)));
            assert_eq!(effect, Effect::None);
            assert!(state.is_paused());
        }
    }

    #[test]
    fn sessions_are_unique() {
        assert_ne!(state(true).session_id, state(true).session_id);
    }

    #[test]
    fn view_builds() {
        let mut state = state(true);
        let _ = state.view();
        state.update(Message::SurfaceTapped);
        let _ = state.view();
    }
}
