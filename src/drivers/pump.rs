//! Brew pump driver with its cycle timer.
//!
//! A MOSFET switches the pump; a brew cycle is a fixed run time pushing
//! the heated water through the grounds.  The pump is a dumb actuator:
//! it stops itself only when told to, and reports when the configured
//! run time has elapsed.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpState {
    Stopped,
    Running { since_ms: u32 },
}

pub struct PumpDriver {
    state: PumpState,
    brew_duration_ms: u32,
}

impl PumpDriver {
    pub fn new(brew_duration_ms: u32) -> Self {
        Self {
            state: PumpState::Stopped,
            brew_duration_ms,
        }
    }

    /// Start a brew cycle at `now_ms`.  Restarting a running pump keeps
    /// the original start time.
    pub fn start(&mut self, now_ms: u32) {
        if self.is_running() {
            return;
        }
        self.set_hw(true);
        self.state = PumpState::Running { since_ms: now_ms };
    }

    pub fn stop(&mut self) {
        self.set_hw(false);
        self.state = PumpState::Stopped;
    }

    /// The current cycle has run for at least the brew duration.
    pub fn is_done(&self, now_ms: u32) -> bool {
        match self.state {
            PumpState::Running { since_ms } => {
                now_ms.wrapping_sub(since_ms) >= self.brew_duration_ms
            }
            PumpState::Stopped => false,
        }
    }

    fn set_hw(&self, on: bool) {
        hw_init::gpio_write(pins::PUMP_GPIO, on);
    }

    pub fn state(&self) -> PumpState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.state, PumpState::Stopped)
    }
}
