// SPDX-License-Identifier: MPL-2.0
pub mod mute_icon;
pub mod scrub_bar;
pub mod translate;
pub mod video_canvas;

pub use scrub_bar::ScrubBar;
pub use translate::{translate, Translate};
pub use video_canvas::VideoCanvas;
