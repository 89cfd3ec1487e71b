// SPDX-License-Identifier: MPL-2.0
//! Progress events reported by the video element and the duration they carry.

/// Placeholder duration meaning "not known yet".
pub const DURATION_SENTINEL: f64 = 1.0;

/// Periodic report of playback position and known duration bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressEvent {
    /// Current playback position in seconds.
    pub current_time: f64,
    /// Duration that can be played without further loading, in seconds.
    pub playable_duration: f64,
    /// Duration that can be seeked into, in seconds.
    pub seekable_duration: f64,
}

/// Known duration bounds of the current source.
///
/// Starts at the sentinel and is filled from the first progress event that
/// arrives while the playable duration still equals the sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationInfo {
    pub playable_duration: f64,
    pub seekable_duration: f64,
}

impl DurationInfo {
    /// Returns true while no duration has been captured.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.playable_duration == DURATION_SENTINEL
    }

    /// Captures the event's durations if none have been captured yet.
    ///
    /// Returns true when the stored values changed.
    pub fn capture(&mut self, event: &ProgressEvent) -> bool {
        if !self.is_unknown() {
            return false;
        }
        let captured = Self {
            playable_duration: event.playable_duration,
            seekable_duration: event.seekable_duration,
        };
        let changed = captured != *self;
        *self = captured;
        changed
    }

    /// Upper bound of the scrub range in seconds.
    #[must_use]
    pub fn scrub_range_end(&self) -> f64 {
        if self.seekable_duration.is_finite() && self.seekable_duration > 0.0 {
            self.seekable_duration
        } else {
            DURATION_SENTINEL
        }
    }
}

impl Default for DurationInfo {
    fn default() -> Self {
        Self {
            playable_duration: DURATION_SENTINEL,
            seekable_duration: DURATION_SENTINEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(current_time: f64, duration: f64) -> ProgressEvent {
        ProgressEvent {
            current_time,
            playable_duration: duration,
            seekable_duration: duration,
        }
    }

    #[test]
    fn default_is_sentinel() {
        let info = DurationInfo::default();
        assert!(info.is_unknown());
        assert_eq!(info.seekable_duration, DURATION_SENTINEL);
    }

    #[test]
    fn first_event_is_captured() {
        let mut info = DurationInfo::default();
        assert!(info.capture(&event(12.0, 120.0)));
        assert_eq!(info.playable_duration, 120.0);
        assert_eq!(info.seekable_duration, 120.0);
    }

    #[test]
    fn later_events_are_ignored() {
        let mut info = DurationInfo::default();
        info.capture(&event(12.0, 120.0));
        assert!(!info.capture(&event(13.0, 999.0)));
        assert_eq!(info.playable_duration, 120.0);
    }

    #[test]
    fn sentinel_valued_event_keeps_capture_open() {
        let mut info = DurationInfo::default();
        assert!(!info.capture(&event(0.0, DURATION_SENTINEL)));
        assert!(info.is_unknown());
        assert!(info.capture(&event(0.5, 30.0)));
        assert_eq!(info.seekable_duration, 30.0);
    }

    #[test]
    fn scrub_range_guards_against_bad_durations() {
        let info = DurationInfo {
            playable_duration: 10.0,
            seekable_duration: f64::NAN,
        };
        assert_eq!(info.scrub_range_end(), DURATION_SENTINEL);

        let info = DurationInfo {
            playable_duration: 10.0,
            seekable_duration: 42.0,
        };
        assert_eq!(info.scrub_range_end(), 42.0);
    }
}
