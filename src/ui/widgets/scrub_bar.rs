// SPDX-License-Identifier: MPL-2.0
//! Timeline scrubber with a `MM:SS / MM:SS` label.
//!
//! While the handle is dragged the bar shows a local preview position and
//! nothing is sent to the video. The seek target is reported once, on
//! release.

use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::styles;
use crate::video_player::DurationInfo;
use iced::widget::{container, progress_bar, row, slider, text};
use iced::{Alignment, Color, Element, Length};

/// Slider step in seconds (1ms precision).
const SLIDER_STEP_SECS: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// Handle moved to a new position, in seconds.
    Dragged(f64),
    /// Handle let go.
    Released,
}

/// Drag state of the scrubber.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrubBar {
    preview: Option<f64>,
}

impl ScrubBar {
    /// Applies a scrubber message. Returns the seek target on release.
    pub fn update(&mut self, message: Message) -> Option<f64> {
        match message {
            Message::Dragged(position) => {
                self.preview = Some(position);
                None
            }
            Message::Released => self.preview.take(),
        }
    }

    /// Position to draw: the drag preview, or the playback position.
    pub fn display_position(&self, current_time: f64) -> f64 {
        self.preview.unwrap_or(current_time)
    }

    /// Renders the scrubber. Without `interactive` a plain track is drawn
    /// that lets pointer events through.
    pub fn view(
        &self,
        current_time: f64,
        duration: &DurationInfo,
        alpha: f32,
        interactive: bool,
    ) -> Element<'_, Message> {
        let end = duration.scrub_range_end();
        let position = self.display_position(current_time);

        let track: Element<'_, Message> = if interactive {
            slider(0.0..=end, position, Message::Dragged)
                .on_release(Message::Released)
                .step(SLIDER_STEP_SECS)
                .width(Length::Fill)
                .style(styles::slider::scrub(alpha))
                .into()
        } else {
            container(
                progress_bar(0.0..=end as f32, position as f32)
                    .style(styles::slider::scrub_track(alpha)),
            )
            .width(Length::Fill)
            .height(Length::Fixed(sizing::TIMELINE_TRACK))
            .into()
        };

        let label = text(format!(
            "{} / {}",
            format_time(position),
            format_time(duration.playable_duration)
        ))
        .size(typography::CAPTION)
        .color(Color {
            a: alpha,
            ..Color::WHITE
        });

        row![track, label]
            .spacing(spacing::XS)
            .align_y(Alignment::Center)
            .width(Length::Fill)
            .into()
    }
}

/// Formats seconds as MM:SS, or HH:MM:SS past the hour.
pub fn format_time(seconds: f64) -> String {
    let total_secs = seconds.max(0.0) as u64;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}
