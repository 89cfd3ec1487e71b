// SPDX-License-Identifier: MPL-2.0
//! Design tokens for the player surface: colours, opacities, spacing, sizes.
//!
//! ```
//! use video_view::ui::design_tokens::{opacity, palette};
//! use iced::Color;
//!
//! let scrim = Color {
//!     a: opacity::SCRIM,
//!     ..palette::BLACK
//! };
//! assert_eq!(scrim.a, 0.5);
//! ```

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use super::Color;

    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);

    pub const PRIMARY_400: Color = Color::from_rgb(0.4, 0.7, 1.0);
    pub const PRIMARY_500: Color = Color::from_rgb(0.3, 0.6, 0.9);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    /// Dark end of the overlay gradients.
    pub const SCRIM: f32 = 0.5;
    pub const OVERLAY_HOVER: f32 = 0.8;
    pub const OPAQUE: f32 = 1.0;
}

// ============================================================================
// Spacing Scale
// ============================================================================

pub mod spacing {
    pub const XS: f32 = 8.0;
    /// Inner padding of the overlay panels.
    pub const PANEL: f32 = 10.0;
}

// ============================================================================
// Sizing Scale
// ============================================================================

pub mod sizing {
    /// Overlay icon buttons are square.
    pub const OVERLAY_ICON: f32 = 30.0;

    /// Height of an overlay panel: icon plus padding on both sides.
    pub const OVERLAY_PANEL_HEIGHT: f32 = OVERLAY_ICON + 2.0 * super::spacing::PANEL;

    pub const SCRUBBER_THUMB_RADIUS: f32 = 6.0;
    pub const TIMELINE_TRACK: f32 = 4.0;
}

pub mod typography {
    /// Time label next to the scrub bar.
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::SCRIM > 0.0 && opacity::SCRIM < 1.0);
    assert!(spacing::PANEL > spacing::XS);
    assert!(sizing::OVERLAY_PANEL_HEIGHT > sizing::OVERLAY_ICON);
};
