// SPDX-License-Identifier: MPL-2.0
//! Player surface behaviour seen from outside the crate, with a recording
//! handle standing in for the video element.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;
use video_view::config::{self, Config, PlayerConfig};
use video_view::error::Result;
use video_view::ui::video_view::{Message, Props, State};
use video_view::ui::widgets::scrub_bar;
use video_view::video_player::{PlaybackMessage, ProgressEvent, VideoHandle};

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Seek(f64),
    Paused(bool),
    Muted(bool),
}

#[derive(Clone, Default)]
struct RecordingHandle {
    commands: Arc<Mutex<Vec<Command>>>,
}

impl RecordingHandle {
    fn commands(&self) -> Vec<Command> {
        self.commands.lock().expect("poisoned").clone()
    }

    fn seeks(&self) -> Vec<f64> {
        self.commands()
            .into_iter()
            .filter_map(|command| match command {
                Command::Seek(target) => Some(target),
                _ => None,
            })
            .collect()
    }

    fn push(&self, command: Command) -> Result<()> {
        self.commands.lock().expect("poisoned").push(command);
        Ok(())
    }
}

impl VideoHandle for RecordingHandle {
    fn seek(&self, target_secs: f64) -> Result<()> {
        self.push(Command::Seek(target_secs))
    }

    fn set_paused(&self, paused: bool) -> Result<()> {
        self.push(Command::Paused(paused))
    }

    fn set_muted(&self, muted: bool) -> Result<()> {
        self.push(Command::Muted(muted))
    }
}

fn mount(source: &str, paused: bool) -> (State, RecordingHandle) {
    let mut state = State::new(
        Props {
            source: PathBuf::from(source),
            paused,
            title: None,
        },
        &Config::default(),
    );
    let handle = RecordingHandle::default();
    state.attach_handle(handle.clone());
    (state, handle)
}

fn progress(current_time: f64, playable: f64, seekable: f64) -> Message {
    Message::Playback(PlaybackMessage::Progress(ProgressEvent {
        current_time,
        playable_duration: playable,
        seekable_duration: seekable,
    }))
}

#[test]
fn test_mount_progress_scenario() {
    let (mut state, handle) = mount("clip.mp4", true);

    assert_eq!(
        handle.commands(),
        vec![
            Command::Paused(true),
            Command::Muted(true),
            Command::Seek(0.0)
        ]
    );
    let props = state.element_props();
    assert!(props.paused);
    assert!(props.muted);
    assert_eq!(props.source, Path::new("clip.mp4"));

    state.update(progress(12.0, 120.0, 120.0));
    assert_eq!(state.duration().playable_duration, 120.0);
    assert_eq!(state.duration().seekable_duration, 120.0);
    assert_eq!(state.current_time(), 12.0);

    state.update(progress(13.0, 999.0, 999.0));
    assert_eq!(state.duration().playable_duration, 120.0);
    assert_eq!(state.duration().seekable_duration, 120.0);
    assert_eq!(state.current_time(), 13.0);
}

#[test]
fn test_mount_issues_exactly_one_seek_to_start() {
    let (mut state, handle) = mount("clip.mp4", false);

    state.update(progress(1.0, 10.0, 10.0));
    state.update(Message::SurfaceTapped);
    state.update(Message::ToggleMute);

    assert_eq!(handle.seeks(), vec![0.0]);
}

#[test]
fn test_current_time_is_last_write() {
    let (mut state, _handle) = mount("clip.mp4", false);

    for time in [3.0, 1.0, 7.5, 2.25] {
        state.update(progress(time, 60.0, 60.0));
    }

    assert_eq!(state.current_time(), 2.25);
    assert_eq!(state.element_props().current_playback_time, 2.25);
}

#[test]
fn test_duration_waits_for_a_non_sentinel_event() {
    let (mut state, _handle) = mount("clip.mp4", false);

    state.update(progress(0.0, 1.0, 1.0));
    assert!(state.duration().is_unknown());

    state.update(progress(0.5, 42.0, 40.0));
    state.update(progress(0.7, 43.0, 43.0));
    assert_eq!(state.duration().playable_duration, 42.0);
    assert_eq!(state.duration().seekable_duration, 40.0);
}

#[test]
fn test_toggle_playback_parity() {
    for initial in [true, false] {
        for toggles in 0..6 {
            let (mut state, handle) = mount("clip.mp4", initial);
            for _ in 0..toggles {
                state.update(Message::TogglePlayback);
            }

            let expected = initial ^ (toggles % 2 == 1);
            assert_eq!(state.is_paused(), expected, "{initial} after {toggles}");
            assert_eq!(state.element_props().paused, expected);

            let last_paused = handle.commands().into_iter().rev().find_map(|c| match c {
                Command::Paused(p) => Some(p),
                _ => None,
            });
            assert_eq!(last_paused, Some(expected));
        }
    }
}

#[test]
fn test_taps_alternate_overlay_from_hidden() {
    let (mut state, _handle) = mount("clip.mp4", true);
    assert!(!state.is_overlay_visible());

    for tap in 1..=5 {
        state.update(Message::SurfaceTapped);
        assert_eq!(state.is_overlay_visible(), tap % 2 == 1);
    }
}

#[test]
fn test_scrub_release_seeks_once_per_release() {
    let (mut state, handle) = mount("clip.mp4", false);
    state.update(progress(0.0, 120.0, 120.0));

    state.update(Message::ScrubBar(scrub_bar::Message::Dragged(10.0)));
    state.update(Message::ScrubBar(scrub_bar::Message::Dragged(20.0)));
    state.update(Message::ScrubBar(scrub_bar::Message::Released));
    state.update(Message::ScrubBar(scrub_bar::Message::Dragged(90.0)));
    state.update(Message::ScrubBar(scrub_bar::Message::Released));

    assert_eq!(handle.seeks(), vec![0.0, 20.0, 90.0]);
}

#[test]
fn test_mute_default_comes_from_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let saved = Config {
        player: PlayerConfig {
            muted: Some(false),
            ..PlayerConfig::default()
        },
        ..Config::default()
    };
    config::save_to_path(&saved, &path).expect("Failed to write config file");
    let loaded = config::load_from_path(&path).expect("Failed to load config file");

    let mut state = State::new(
        Props {
            source: PathBuf::from("clip.mp4"),
            paused: true,
            title: None,
        },
        &loaded,
    );
    let handle = RecordingHandle::default();
    state.attach_handle(handle.clone());

    assert!(!state.is_muted());
    assert_eq!(handle.commands()[1], Command::Muted(false));
}
