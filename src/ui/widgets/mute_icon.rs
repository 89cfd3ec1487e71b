// SPDX-License-Identifier: MPL-2.0
//! Display-only mute indicator. The toggle lives in the parent's tap target.

use crate::ui::design_tokens::sizing;
use crate::ui::{icons, styles};
use iced::widget::Svg;

/// Crossed speaker while muted, speaker with waves otherwise.
pub fn view(muted: bool, alpha: f32) -> Svg<'static> {
    let icon = if muted {
        icons::volume_mute()
    } else {
        icons::volume()
    };

    icons::sized(icon, sizing::OVERLAY_ICON).style(styles::overlay::icon(alpha))
}
