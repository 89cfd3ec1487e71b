// SPDX-License-Identifier: MPL-2.0
//! Overlay animation: a spring for opacity and a timed curve for the slide.
//!
//! Curves advance only when told to (`advance(dt)`), so the same sequence
//! of frame deltas always produces the same values.

use crate::config::{
    OverlayParams, MIN_SPRING_DAMPING, SPRING_REST_DISPLACEMENT, SPRING_REST_SPEED,
    SPRING_SETTLE_LIMIT_MS,
};
use std::time::{Duration, Instant};

/// Integration step of the spring.
const SPRING_SUBSTEP_SECS: f32 = 0.001;

/// Upper bound for one frame delta, so a stalled window does not jump.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(64);

/// Damped spring moving a scalar toward a target.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    stiffness: f32,
    damping: f32,
    mass: f32,
    /// Time spent moving since the last retarget.
    moving_for: Duration,
}

impl Spring {
    #[must_use]
    pub fn new(value: f32, stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
            stiffness,
            damping: damping.max(MIN_SPRING_DAMPING),
            mass,
            moving_for: Duration::ZERO,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Retargets the spring, keeping current value and velocity.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
        self.moving_for = Duration::ZERO;
    }

    pub fn is_at_rest(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.is_at_rest() {
            return;
        }

        self.moving_for += dt;
        if self.moving_for >= Duration::from_millis(SPRING_SETTLE_LIMIT_MS) {
            self.settle();
            return;
        }

        let mut remaining = dt.as_secs_f32();
        while remaining > 0.0 {
            let h = remaining.min(SPRING_SUBSTEP_SECS);
            let displacement = self.value - self.target;
            let acceleration =
                (-self.stiffness * displacement - self.damping * self.velocity) / self.mass;
            self.velocity += acceleration * h;
            self.value += self.velocity * h;
            remaining -= h;

            if self.velocity.abs() < SPRING_REST_SPEED
                && (self.value - self.target).abs() < SPRING_REST_DISPLACEMENT
            {
                self.settle();
                break;
            }
        }
    }

    fn settle(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }
}

/// Quadratic ease in-out on `t` in `[0, 1]`.
#[must_use]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Fixed-duration eased transition between two values.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    from: f32,
    to: f32,
    elapsed: Duration,
    duration: Duration,
}

impl Timing {
    #[must_use]
    pub fn new(value: f32, duration: Duration) -> Self {
        Self {
            from: value,
            to: value,
            elapsed: duration,
            duration,
        }
    }

    pub fn value(&self) -> f32 {
        if self.is_finished() {
            return self.to;
        }
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * ease_in_out_quad(t)
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Starts a new transition from the current value.
    pub fn set_target(&mut self, to: f32) {
        if to == self.to {
            return;
        }
        self.from = self.value();
        self.to = to;
        self.elapsed = Duration::ZERO;
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }
}

/// Opacity and vertical offset applied to one overlay panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayStyle {
    /// In `[0, 1]`.
    pub opacity: f32,
    /// Logical pixels, negative moves up.
    pub translate_y: f32,
}

/// Shared "overlay visible" value and the two curves it drives.
#[derive(Debug, Clone)]
pub struct OverlayAnimation {
    visible: bool,
    opacity: Spring,
    /// 1.0 fully slid out, 0.0 in place.
    slide: Timing,
    offset: f32,
    last_frame: Option<Instant>,
}

impl OverlayAnimation {
    /// Starts hidden and at rest.
    #[must_use]
    pub fn new(params: OverlayParams) -> Self {
        Self {
            visible: false,
            opacity: Spring::new(0.0, params.stiffness, params.damping, params.mass),
            slide: Timing::new(1.0, params.slide_duration),
            offset: params.slide_offset,
            last_frame: None,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Flips visibility and retargets both curves. Returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.set_visible(!self.visible);
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        if !self.is_animating() {
            self.last_frame = None;
        }
        self.visible = visible;
        self.opacity.set_target(if visible { 1.0 } else { 0.0 });
        self.slide.set_target(if visible { 0.0 } else { 1.0 });
    }

    pub fn is_animating(&self) -> bool {
        !self.opacity.is_at_rest() || !self.slide.is_finished()
    }

    pub fn advance(&mut self, dt: Duration) {
        self.opacity.advance(dt);
        self.slide.advance(dt);
    }

    /// Advances by the time since the previous frame.
    ///
    /// The first frame after a rest only records its timestamp.
    pub fn tick(&mut self, now: Instant) {
        if let Some(last) = self.last_frame {
            let dt = now.saturating_duration_since(last).min(MAX_FRAME_DELTA);
            self.advance(dt);
        }
        self.last_frame = if self.is_animating() { Some(now) } else { None };
    }

    fn opacity(&self) -> f32 {
        self.opacity.value().clamp(0.0, 1.0)
    }

    /// Style of the top panel, enters from above.
    pub fn nav_style(&self) -> OverlayStyle {
        OverlayStyle {
            opacity: self.opacity(),
            translate_y: -self.offset * self.slide.value(),
        }
    }

    /// Style of the bottom panel, enters from below.
    pub fn footer_style(&self) -> OverlayStyle {
        OverlayStyle {
            opacity: self.opacity(),
            translate_y: self.offset * self.slide.value(),
        }
    }
}

impl Default for OverlayAnimation {
    fn default() -> Self {
        Self::new(OverlayParams::default())
    }
}
