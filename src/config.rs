//! System configuration parameters
//!
//! All tunable parameters for the EasyDrink appliance.  Defaults are used
//! at boot; `validate()` guards values that arrive from anywhere else.

use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{Error, Result};

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Alarm ---
    /// Alarm time used until the user sets one.
    pub default_alarm: ClockTime,

    // --- Temperature ---
    /// Target water temperature (°C) used until the user adjusts it.
    pub default_temperature_c: i16,
    /// Lowest target the encoder can select (°C).
    pub min_temperature_c: i16,
    /// Highest target the encoder can select (°C).
    pub max_temperature_c: i16,
    /// Change per encoder detent (°C).
    pub temperature_step_c: i16,

    // --- Brewing ---
    /// How long the pump runs before the drink is considered done.
    pub brew_duration_secs: u16,

    // --- Safety ---
    /// Back-to-back failed thermistor reads before the heater is latched
    /// off and the fault is reported.
    pub sensor_fault_after_reads: u32,

    // --- Timing ---
    /// NEXT_TICK period (milliseconds).
    pub tick_interval_ms: u32,
    /// A REDRAW is queued every this many ticks.
    pub redraw_every_ticks: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Alarm
            default_alarm: ClockTime::new(7, 0, 0),

            // Temperature
            default_temperature_c: 85,
            min_temperature_c: 40,
            max_temperature_c: 98,
            temperature_step_c: 1,

            // Brewing
            brew_duration_secs: 45,

            // Safety
            sensor_fault_after_reads: 3,

            // Timing
            tick_interval_ms: 1000, // 1 Hz
            redraw_every_ticks: 1,
        }
    }
}

impl SystemConfig {
    /// Reject inconsistent parameters.
    pub fn validate(&self) -> Result<()> {
        if self.min_temperature_c >= self.max_temperature_c {
            return Err(Error::Config("min temperature must be below max"));
        }
        if !(self.min_temperature_c..=self.max_temperature_c).contains(&self.default_temperature_c) {
            return Err(Error::Config("default temperature outside min/max"));
        }
        if self.temperature_step_c <= 0 {
            return Err(Error::Config("temperature step must be positive"));
        }
        if self.default_alarm != ClockTime::new(
            self.default_alarm.hour,
            self.default_alarm.minute,
            self.default_alarm.second,
        ) {
            return Err(Error::Config("default alarm out of range"));
        }
        if self.brew_duration_secs == 0 {
            return Err(Error::Config("brew duration must be positive"));
        }
        if self.sensor_fault_after_reads == 0 {
            return Err(Error::Config("sensor fault threshold must be positive"));
        }
        if self.tick_interval_ms == 0 || self.redraw_every_ticks == 0 {
            return Err(Error::Config("timing intervals must be positive"));
        }
        Ok(())
    }

    pub fn brew_duration_ms(&self) -> u32 {
        u32::from(self.brew_duration_secs) * 1000
    }
}
