// SPDX-License-Identifier: MPL-2.0
//! Slider styles.

use crate::ui::design_tokens::{palette, sizing};
use iced::widget::{progress_bar, slider};
use iced::{Background, Border, Color, Theme};

fn faded(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha,
        ..color
    }
}

/// Scrub bar on the footer gradient. Filled part in the primary colour,
/// remaining part in a light gray; everything fades with `alpha`.
pub fn scrub(alpha: f32) -> impl Fn(&Theme, slider::Status) -> slider::Style {
    move |_theme: &Theme, status: slider::Status| {
        let handle = match status {
            slider::Status::Hovered | slider::Status::Dragged => palette::PRIMARY_400,
            slider::Status::Active => palette::WHITE,
        };

        slider::Style {
            rail: slider::Rail {
                backgrounds: (
                    Background::Color(faded(palette::PRIMARY_500, alpha)),
                    Background::Color(faded(palette::GRAY_200, alpha * 0.5)),
                ),
                width: sizing::TIMELINE_TRACK,
                border: Border {
                    color: Color::TRANSPARENT,
                    width: 0.0,
                    radius: (sizing::TIMELINE_TRACK / 2.0).into(),
                },
            },
            handle: slider::Handle {
                shape: slider::HandleShape::Circle {
                    radius: sizing::SCRUBBER_THUMB_RADIUS,
                },
                background: Background::Color(faded(handle, alpha)),
                border_width: 0.0,
                border_color: Color::TRANSPARENT,
            },
        }
    }
}

/// Read-only rendition of [`scrub`] used while the overlay ignores input.
pub fn scrub_track(alpha: f32) -> impl Fn(&Theme) -> progress_bar::Style {
    move |_theme: &Theme| progress_bar::Style {
        background: Background::Color(faded(palette::GRAY_200, alpha * 0.5)),
        bar: Background::Color(faded(palette::PRIMARY_500, alpha)),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: (sizing::TIMELINE_TRACK / 2.0).into(),
        },
    }
}
