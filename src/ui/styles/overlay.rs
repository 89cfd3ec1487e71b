// SPDX-License-Identifier: MPL-2.0
//! Gradient backgrounds and icon tints for the nav and footer overlays.

use crate::ui::design_tokens::{
    opacity,
    palette::{BLACK, WHITE},
};
use iced::gradient::Linear;
use iced::widget::{container, svg};
use iced::{Background, Color, Radians, Theme};
use std::f32::consts::PI;

/// Top-to-bottom direction.
const DOWNWARD: Radians = Radians(PI);

fn scrim(alpha: f32) -> Color {
    Color {
        a: opacity::SCRIM * alpha,
        ..BLACK
    }
}

fn vertical_gradient(top: Color, bottom: Color) -> Background {
    Background::Gradient(
        Linear::new(DOWNWARD)
            .add_stop(0.0, top)
            .add_stop(1.0, bottom)
            .into(),
    )
}

/// Top panel: dark at the top edge, fading to transparent.
pub fn nav_gradient(alpha: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(vertical_gradient(scrim(alpha), Color::TRANSPARENT)),
        text_color: Some(Color { a: alpha, ..WHITE }),
        ..Default::default()
    }
}

/// Bottom panel: transparent at the top, dark at the bottom edge.
pub fn footer_gradient(alpha: f32) -> impl Fn(&Theme) -> container::Style {
    move |_theme: &Theme| container::Style {
        background: Some(vertical_gradient(Color::TRANSPARENT, scrim(alpha))),
        text_color: Some(Color { a: alpha, ..WHITE }),
        ..Default::default()
    }
}

/// Solid black behind the video frame.
#[must_use]
pub fn surface(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Background::Color(BLACK)),
        ..Default::default()
    }
}

/// Tints a white SVG icon with the overlay alpha.
pub fn icon(alpha: f32) -> impl Fn(&Theme, svg::Status) -> svg::Style {
    move |_theme: &Theme, _status: svg::Status| svg::Style {
        color: Some(Color { a: alpha, ..WHITE }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops(background: Option<Background>) -> (Color, Color) {
        match background {
            Some(Background::Gradient(iced::Gradient::Linear(linear))) => {
                let first = linear.stops[0].map(|s| s.color);
                let last = linear.stops[1].map(|s| s.color);
                (
                    first.unwrap_or(Color::TRANSPARENT),
                    last.unwrap_or(Color::TRANSPARENT),
                )
            }
            other => panic!("expected a linear gradient, got {other:?}"),
        }
    }

    #[test]
    fn nav_is_dark_on_top() {
        let (top, bottom) = stops(nav_gradient(1.0)(&Theme::Dark).background);
        assert_eq!(top.a, 0.5);
        assert_eq!(bottom.a, 0.0);
    }

    #[test]
    fn footer_is_dark_at_the_bottom() {
        let (top, bottom) = stops(footer_gradient(1.0)(&Theme::Dark).background);
        assert_eq!(top.a, 0.0);
        assert_eq!(bottom.a, 0.5);
    }

    #[test]
    fn gradients_fade_with_alpha() {
        let (top, _) = stops(nav_gradient(0.5)(&Theme::Dark).background);
        assert_eq!(top.a, 0.25);
        assert_eq!(
            nav_gradient(0.0)(&Theme::Dark).text_color.map(|c| c.a),
            Some(0.0)
        );
    }

    #[test]
    fn icon_tint_uses_alpha() {
        let style = icon(0.3)(&Theme::Dark, svg::Status::Idle);
        assert_eq!(style.color.map(|c| c.a), Some(0.3));
    }
}
