// SPDX-License-Identifier: MPL-2.0
//! `video_view` is a video player surface built with the Iced GUI framework.
//!
//! A tap on the video fades and slides overlay controls in and out: back and
//! options at the top, play/pause, a scrub bar, mute and fullscreen at the
//! bottom. Frames come from an FFmpeg decoder running on a Tokio blocking
//! task.

pub mod app;
pub mod config;
pub mod error;
pub mod ui;
pub mod video_player;
