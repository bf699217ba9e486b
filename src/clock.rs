//! Wall-clock time of day.
//!
//! The appliance only cares about hour/minute/second; date fields are never
//! shown or edited, so they are not modelled.

use core::fmt;

use serde::{Deserialize, Serialize};

pub const HOURS_PER_DAY: u8 = 24;
pub const MINUTES_PER_HOUR: u8 = 60;
pub const SECONDS_PER_MINUTE: u8 = 60;

/// A time of day, always normalised (`hour < 24`, `minute < 60`,
/// `second < 60`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ClockTime {
    pub const MIDNIGHT: Self = Self::new(0, 0, 0);

    /// Build a time, folding out-of-range fields back into range.
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour: hour % HOURS_PER_DAY,
            minute: minute % MINUTES_PER_HOUR,
            second: second % SECONDS_PER_MINUTE,
        }
    }

    /// Time of day `secs` seconds after midnight (wraps every 24 h).
    pub const fn from_secs_of_day(secs: u64) -> Self {
        let secs = secs % 86_400;
        Self {
            hour: (secs / 3_600) as u8,
            minute: ((secs / 60) % 60) as u8,
            second: (secs % 60) as u8,
        }
    }

    pub const fn secs_of_day(&self) -> u32 {
        self.hour as u32 * 3_600 + self.minute as u32 * 60 + self.second as u32
    }

    /// Step the hour by `delta`, wrapping within 0–23.  Other fields are kept.
    pub fn step_hour(&mut self, delta: i8) {
        self.hour = wrap_step(self.hour, delta, HOURS_PER_DAY);
    }

    /// Step the minute by `delta`, wrapping within 0–59 without carrying
    /// into the hour.  Seconds are zeroed so an edited time starts on the
    /// minute.
    pub fn step_minute(&mut self, delta: i8) {
        self.minute = wrap_step(self.minute, delta, MINUTES_PER_HOUR);
        self.second = 0;
    }

    /// `true` when hour and minute match (seconds ignored).
    pub fn same_minute(&self, other: &Self) -> bool {
        self.hour == other.hour && self.minute == other.minute
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

fn wrap_step(value: u8, delta: i8, modulus: u8) -> u8 {
    (i16::from(value) + i16::from(delta)).rem_euclid(i16::from(modulus)) as u8
}
