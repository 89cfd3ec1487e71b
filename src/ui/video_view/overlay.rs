// SPDX-License-Identifier: MPL-2.0
//! Nav and footer panels drawn over the video.
//!
//! Both are pure functions of the state slice they receive. Every colour is
//! multiplied by the animated opacity and the panel is shifted by the
//! animated offset. Without `interactive` the controls ignore the pointer so
//! a click reaches the surface below.

use super::Message;
use crate::ui::animation::OverlayStyle;
use crate::ui::design_tokens::{sizing, spacing};
use crate::ui::widgets::{mute_icon, translate, ScrubBar};
use crate::ui::{icons, styles};
use crate::video_player::DurationInfo;
use iced::widget::{button, container, mouse_area, row, Space, Svg};
use iced::{Alignment, Element, Length};

/// Everything the footer draws.
#[derive(Debug, Clone, Copy)]
pub struct FooterContext<'a> {
    pub style: OverlayStyle,
    pub interactive: bool,
    pub paused: bool,
    pub muted: bool,
    pub current_time: f64,
    pub duration: &'a DurationInfo,
    pub scrub_bar: &'a ScrubBar,
}

/// Top panel: back on the left, options on the right.
pub fn nav<'a>(style: OverlayStyle, interactive: bool) -> Element<'a, Message> {
    let alpha = style.opacity;
    let on_press = |message| interactive.then_some(message);

    let content = row![
        icon_button(icons::back(), alpha, on_press(Message::Back)),
        Space::new().width(Length::Fill),
        icon_button(icons::options(), alpha, on_press(Message::Options)),
    ]
    .align_y(Alignment::Center);

    panel(content, style, styles::overlay::nav_gradient(alpha))
}

/// Bottom panel: play/pause, scrub bar, mute, fullscreen.
pub fn footer(ctx: FooterContext<'_>) -> Element<'_, Message> {
    let alpha = ctx.style.opacity;
    let on_press = |message| ctx.interactive.then_some(message);

    let play_pause = if ctx.paused {
        icons::play()
    } else {
        icons::pause()
    };

    let scrub = ctx
        .scrub_bar
        .view(ctx.current_time, ctx.duration, alpha, ctx.interactive)
        .map(Message::ScrubBar);

    let mute: Element<'_, Message> = if ctx.interactive {
        mouse_area(mute_icon::view(ctx.muted, alpha))
            .on_press(Message::ToggleMute)
            .interaction(iced::mouse::Interaction::Pointer)
            .into()
    } else {
        mute_icon::view(ctx.muted, alpha).into()
    };

    let content = row![
        icon_button(play_pause, alpha, on_press(Message::TogglePlayback)),
        scrub,
        mute,
        icon_button(icons::fullscreen(), alpha, on_press(Message::Fullscreen)),
    ]
    .spacing(spacing::XS)
    .align_y(Alignment::Center);

    panel(content, ctx.style, styles::overlay::footer_gradient(alpha))
}

fn panel<'a>(
    content: impl Into<Element<'a, Message>>,
    style: OverlayStyle,
    background: impl Fn(&iced::Theme) -> container::Style + 'a,
) -> Element<'a, Message> {
    let body = container(content)
        .padding(spacing::PANEL)
        .width(Length::Fill)
        .height(Length::Fixed(sizing::OVERLAY_PANEL_HEIGHT))
        .align_y(Alignment::Center)
        .style(background);

    translate(body).y(style.translate_y).into()
}

fn icon_button<'a>(
    icon: Svg<'static>,
    alpha: f32,
    on_press: Option<Message>,
) -> Element<'a, Message> {
    button(icons::sized(icon, sizing::OVERLAY_ICON).style(styles::overlay::icon(alpha)))
        .padding(0)
        .style(styles::button::overlay_icon(alpha))
        .on_press_maybe(on_press)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOWN: OverlayStyle = OverlayStyle {
        opacity: 1.0,
        translate_y: 0.0,
    };

    const HIDDEN: OverlayStyle = OverlayStyle {
        opacity: 0.0,
        translate_y: 50.0,
    };

    #[test]
    fn nav_builds_in_both_states() {
        let _ = nav(SHOWN, true);
        let _ = nav(HIDDEN, false);
    }

    #[test]
    fn footer_builds_for_every_flag_combination() {
        let duration = DurationInfo::default();
        let scrub_bar = ScrubBar::default();
        for (paused, muted, interactive) in [
            (true, true, true),
            (false, false, true),
            (true, false, false),
        ] {
            let _ = footer(FooterContext {
                style: if interactive { SHOWN } else { HIDDEN },
                interactive,
                paused,
                muted,
                current_time: 0.0,
                duration: &duration,
                scrub_bar: &scrub_bar,
            });
        }
    }
}
