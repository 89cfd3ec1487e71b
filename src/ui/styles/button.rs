// SPDX-License-Identifier: MPL-2.0
//! Button styles.

use crate::ui::design_tokens::{opacity, palette::WHITE};
use iced::widget::button;
use iced::{Border, Color, Shadow, Theme};

/// Borderless icon button drawn straight onto an overlay gradient.
///
/// Only the icon is visible; `alpha` fades the icon colour with the overlay.
pub fn overlay_icon(alpha: f32) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme: &Theme, status: button::Status| {
        let tint = match status {
            button::Status::Hovered | button::Status::Pressed => opacity::OVERLAY_HOVER,
            _ => opacity::OPAQUE,
        };

        button::Style {
            background: None,
            text_color: Color {
                a: alpha * tint,
                ..WHITE
            },
            border: Border::default(),
            shadow: Shadow::default(),
            snap: true,
        }
    }
}
