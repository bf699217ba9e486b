//! "Drink ready" indicator LED.
//!
//! Single GPIO output.  On host/test the level is tracked in-memory only.

use crate::drivers::hw_init;
use crate::pins;

pub struct ReadyLed {
    on: bool,
}

impl ReadyLed {
    pub fn new() -> Self {
        Self { on: false }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(pins::READY_LED_GPIO, on);
        self.on = on;
    }

    pub fn off(&mut self) {
        self.set(false);
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}

impl Default for ReadyLed {
    fn default() -> Self {
        Self::new()
    }
}
