//! Software real-time clock.
//!
//! The board has no battery-backed RTC, so wall-clock time is kept as an
//! offset from the monotonic uptime counter:
//!
//! - **`target_os = "espidf"`** — uptime from `esp_timer_get_time()`
//!   (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`** — uptime from `std::time::Instant`
//!   for host-side testing and simulation.
//!
//! Time of day is lost on power cycle; the user sets it through the
//! encoder menu.

use crate::app::ports::ClockPort;
use crate::clock::ClockTime;
use crate::drivers::hw_init;

const SECS_PER_DAY: u32 = 86_400;

pub struct SoftRtc {
    /// Seconds after midnight at `anchor_ms`.
    base_secs: u32,
    /// Uptime the base was taken at.
    anchor_ms: u32,
}

impl SoftRtc {
    /// Start counting from `initial` now.
    pub fn new(initial: ClockTime) -> Self {
        Self::new_at(initial, hw_init::uptime_ms())
    }

    pub fn new_at(initial: ClockTime, uptime_ms: u32) -> Self {
        Self {
            base_secs: initial.secs_of_day(),
            anchor_ms: uptime_ms,
        }
    }

    /// Time of day at `uptime_ms`.  Whole elapsed seconds are folded into
    /// the base so the uptime counter may wrap between reads.
    pub fn time_at(&mut self, uptime_ms: u32) -> ClockTime {
        let elapsed_secs = uptime_ms.wrapping_sub(self.anchor_ms) / 1_000;
        self.base_secs = (self.base_secs + elapsed_secs % SECS_PER_DAY) % SECS_PER_DAY;
        self.anchor_ms = self.anchor_ms.wrapping_add(elapsed_secs * 1_000);
        ClockTime::from_secs_of_day(u64::from(self.base_secs))
    }

    pub fn set_at(&mut self, time: ClockTime, uptime_ms: u32) {
        self.base_secs = time.secs_of_day();
        self.anchor_ms = uptime_ms;
    }
}

impl ClockPort for SoftRtc {
    fn read_current_time(&mut self) -> ClockTime {
        self.time_at(hw_init::uptime_ms())
    }

    fn set_time(&mut self, time: ClockTime) {
        self.set_at(time, hw_init::uptime_ms());
    }
}
