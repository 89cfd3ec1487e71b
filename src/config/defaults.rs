// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Player**: initial mute state and surface width
//! - **Overlay**: spring and slide curve parameters for the control panels
//! - **Video**: progress event cadence of the video element

// ==========================================================================
// Player Defaults
// ==========================================================================

/// Videos start muted.
pub const DEFAULT_MUTED: bool = true;

/// Player width used before the window reports its real size.
pub const DEFAULT_PLAYER_WIDTH: f32 = 800.0;

/// Smallest player width we lay out for.
pub const MIN_PLAYER_WIDTH: f32 = 160.0;

/// Largest player width we lay out for.
pub const MAX_PLAYER_WIDTH: f32 = 7680.0;

// ==========================================================================
// Overlay Animation Defaults
// ==========================================================================

/// Spring stiffness for the overlay opacity curve.
pub const DEFAULT_SPRING_STIFFNESS: f32 = 100.0;

/// Spring damping for the overlay opacity curve.
pub const DEFAULT_SPRING_DAMPING: f32 = 10.0;

/// Spring mass for the overlay opacity curve.
pub const DEFAULT_SPRING_MASS: f32 = 1.0;

/// Below this speed (units/s) a spring may come to rest.
pub const SPRING_REST_SPEED: f32 = 2.0;

/// Below this distance from target a spring may come to rest.
pub const SPRING_REST_DISPLACEMENT: f32 = 0.01;

/// A spring still moving this long after being retargeted snaps to its
/// target (milliseconds).
pub const SPRING_SETTLE_LIMIT_MS: u64 = 5000;

pub const MIN_SPRING_STIFFNESS: f32 = 1.0;
pub const MAX_SPRING_STIFFNESS: f32 = 1000.0;
pub const MIN_SPRING_DAMPING: f32 = 1.0;
pub const MAX_SPRING_DAMPING: f32 = 200.0;
pub const MIN_SPRING_MASS: f32 = 0.1;
pub const MAX_SPRING_MASS: f32 = 20.0;

/// Duration of the overlay slide curve (milliseconds).
pub const DEFAULT_SLIDE_DURATION_MS: u32 = 300;

/// Minimum slide duration (milliseconds).
pub const MIN_SLIDE_DURATION_MS: u32 = 0;

/// Maximum slide duration (milliseconds).
pub const MAX_SLIDE_DURATION_MS: u32 = 5000;

/// Distance the panels travel when hidden (logical pixels).
pub const DEFAULT_SLIDE_OFFSET: f32 = 50.0;

/// Maximum slide distance (logical pixels).
pub const MAX_SLIDE_OFFSET: f32 = 500.0;

// ==========================================================================
// Video Element Defaults
// ==========================================================================

/// Interval between progress events while playing (milliseconds).
pub const DEFAULT_PROGRESS_INTERVAL_MS: u32 = 250;

/// Minimum progress interval (milliseconds).
pub const MIN_PROGRESS_INTERVAL_MS: u32 = 16;

/// Maximum progress interval (milliseconds).
pub const MAX_PROGRESS_INTERVAL_MS: u32 = 5000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_PLAYER_WIDTH > 0.0);
    assert!(DEFAULT_PLAYER_WIDTH >= MIN_PLAYER_WIDTH);
    assert!(DEFAULT_PLAYER_WIDTH <= MAX_PLAYER_WIDTH);

    assert!(DEFAULT_SPRING_STIFFNESS >= MIN_SPRING_STIFFNESS);
    assert!(DEFAULT_SPRING_STIFFNESS <= MAX_SPRING_STIFFNESS);
    assert!(MIN_SPRING_DAMPING > 0.0);
    assert!(DEFAULT_SPRING_DAMPING >= MIN_SPRING_DAMPING);
    assert!(DEFAULT_SPRING_DAMPING <= MAX_SPRING_DAMPING);
    assert!(DEFAULT_SPRING_MASS >= MIN_SPRING_MASS);
    assert!(DEFAULT_SPRING_MASS <= MAX_SPRING_MASS);

    assert!(DEFAULT_SLIDE_DURATION_MS <= MAX_SLIDE_DURATION_MS);
    assert!(DEFAULT_SLIDE_OFFSET <= MAX_SLIDE_OFFSET);

    assert!(MIN_PROGRESS_INTERVAL_MS > 0);
    assert!(DEFAULT_PROGRESS_INTERVAL_MS >= MIN_PROGRESS_INTERVAL_MS);
    assert!(DEFAULT_PROGRESS_INTERVAL_MS <= MAX_PROGRESS_INTERVAL_MS);
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_defaults_are_valid() {
        assert!(DEFAULT_MUTED);
        assert_eq!(DEFAULT_PLAYER_WIDTH, 800.0);
    }

    #[test]
    fn spring_defaults_match_mobile_driver() {
        assert_eq!(DEFAULT_SPRING_STIFFNESS, 100.0);
        assert_eq!(DEFAULT_SPRING_DAMPING, 10.0);
        assert_eq!(DEFAULT_SPRING_MASS, 1.0);
    }

    #[test]
    fn slide_defaults_are_valid() {
        assert_eq!(DEFAULT_SLIDE_DURATION_MS, 300);
        assert_eq!(DEFAULT_SLIDE_OFFSET, 50.0);
    }

    #[test]
    fn progress_interval_defaults_are_valid() {
        assert_eq!(DEFAULT_PROGRESS_INTERVAL_MS, 250);
        assert!(DEFAULT_PROGRESS_INTERVAL_MS >= MIN_PROGRESS_INTERVAL_MS);
    }
}
