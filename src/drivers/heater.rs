//! Heating element driver (zero-cross SSR).
//!
//! Single GPIO output to the solid-state relay.  The element is either
//! fully on or off; the FSM decides when, this driver only switches.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use log::warn;

use crate::drivers::hw_init;
use crate::pins;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaterState {
    Off,
    On,
    Faulted(&'static str),
}

pub struct HeaterDriver {
    state: HeaterState,
}

impl HeaterDriver {
    pub fn new() -> Self {
        Self {
            state: HeaterState::Off,
        }
    }

    pub fn enable(&mut self) {
        if matches!(self.state, HeaterState::Faulted(_)) {
            warn!("Heater enable refused: driver faulted");
            return;
        }
        self.set_hw(true);
        self.state = HeaterState::On;
    }

    pub fn disable(&mut self) {
        self.set_hw(false);
        if self.state == HeaterState::On {
            self.state = HeaterState::Off;
        }
    }

    /// Latch the element off until [`clear_fault`](Self::clear_fault).
    pub fn fault_shutdown(&mut self, reason: &'static str) {
        self.set_hw(false);
        self.state = HeaterState::Faulted(reason);
        warn!("Heater fault shutdown: {}", reason);
    }

    pub fn clear_fault(&mut self) {
        if matches!(self.state, HeaterState::Faulted(_)) {
            self.state = HeaterState::Off;
        }
    }

    fn set_hw(&self, on: bool) {
        hw_init::gpio_write(pins::HEATER_GPIO, on);
    }

    pub fn state(&self) -> HeaterState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state == HeaterState::On
    }
}

impl Default for HeaterDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_disable() {
        let mut h = HeaterDriver::new();
        h.enable();
        assert!(h.is_on());
        h.disable();
        assert_eq!(h.state(), HeaterState::Off);
    }

    #[test]
    fn fault_latches_until_cleared() {
        let mut h = HeaterDriver::new();
        h.enable();
        h.fault_shutdown("sensor open");
        h.enable();
        assert!(!h.is_on());
        h.disable();
        assert_eq!(h.state(), HeaterState::Faulted("sensor open"));
        h.clear_fault();
        h.enable();
        assert!(h.is_on());
    }
}
