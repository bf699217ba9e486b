//! Software alarm comparator.
//!
//! Compares the wall clock against the armed alarm time on every poll and
//! fires once when the hour and minute match.  A latch holds off further
//! fires until the clock leaves the matching minute, so polling faster
//! than once a minute cannot produce duplicate alarms.

use crate::clock::ClockTime;

#[derive(Debug, Clone, Copy, Default)]
pub struct AlarmComparator {
    armed: Option<ClockTime>,
    latched: bool,
}

impl AlarmComparator {
    pub const fn new() -> Self {
        Self {
            armed: None,
            latched: false,
        }
    }

    /// Arm (or re-arm) for `at`; seconds are ignored.
    pub fn arm(&mut self, at: ClockTime) {
        self.armed = Some(at);
        self.latched = false;
    }

    /// `true` exactly once per matching minute.
    pub fn check(&mut self, now: ClockTime) -> bool {
        let Some(at) = self.armed else {
            return false;
        };
        if !now.same_minute(&at) {
            self.latched = false;
            return false;
        }
        if self.latched {
            return false;
        }
        self.latched = true;
        true
    }
}
