// SPDX-License-Identifier: MPL-2.0
//! Overlay icons.
//!
//! SVG sources are embedded at compile time via `include_bytes!` and their
//! handles are cached in a `OnceLock`, so every lookup after the first is a
//! cheap clone. All glyphs are white, for use on the dark overlay gradients.
//!
//! Icons use visual names (`volume_mute`), not action names.

use iced::widget::svg::{Handle, Svg};
use iced::Length;
use std::sync::OnceLock;

macro_rules! define_icon {
    ($name:ident, $filename:literal, $doc:literal) => {
        #[doc = $doc]
        pub fn $name() -> Svg<'static> {
            static HANDLE: OnceLock<Handle> = OnceLock::new();
            static DATA: &[u8] = include_bytes!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/assets/icons/",
                $filename
            ));
            let handle = HANDLE.get_or_init(|| Handle::from_memory(DATA));
            Svg::new(handle.clone())
        }
    };
}

define_icon!(play, "play.svg", "Play icon: triangle pointing right.");
define_icon!(pause, "pause.svg", "Pause icon: two vertical bars.");
define_icon!(volume, "volume.svg", "Speaker with sound waves.");
define_icon!(volume_mute, "volume_mute.svg", "Speaker with a cross.");
define_icon!(fullscreen, "fullscreen.svg", "Four corner brackets.");
define_icon!(back, "back.svg", "Chevron pointing left.");
define_icon!(options, "options.svg", "Three horizontal dots.");

/// Sets a square size on an icon.
pub fn sized(icon: Svg<'static>, size: f32) -> Svg<'static> {
    icon.width(Length::Fixed(size)).height(Length::Fixed(size))
}
