// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Elm-style "state down, messages up": [`video_view`] owns the player state
//! and renders pure overlay fragments and child widgets from it.
//!
//! - [`video_view`] - Player surface with the nav and footer overlays
//! - [`animation`] - Spring and timed curves driving the overlays
//! - [`widgets`] - Scrub bar, mute icon, video canvas, translate wrapper
//! - [`styles`] - Centralized styling (buttons, overlays, sliders)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`icons`] - Embedded SVG icons

pub mod animation;
pub mod design_tokens;
pub mod icons;
pub mod styles;
pub mod video_view;
pub mod widgets;
