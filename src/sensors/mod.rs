//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and keeps the last good reading of
//! each, which the hardware adapter hands to the domain before a tick.
//! A run of failed reads longer than the configured limit becomes a
//! sensor fault; one good read clears it.

pub mod temperature;

use log::{info, warn};

use crate::error::SensorError;
use temperature::TemperatureSensor;

/// Aggregates all sensor drivers.
pub struct SensorHub {
    pub temperature: TemperatureSensor,
    last_water_temp_c: i16,
    consecutive_failures: u32,
    fault_after_reads: u32,
    last_error: Option<SensorError>,
}

impl SensorHub {
    /// Construct a new hub.  `initial_water_temp_c` stands in until the
    /// first good reading; `fault_after_reads` failures in a row raise a
    /// fault.
    pub fn new(temperature: TemperatureSensor, initial_water_temp_c: i16, fault_after_reads: u32) -> Self {
        Self {
            temperature,
            last_water_temp_c: initial_water_temp_c,
            consecutive_failures: 0,
            fault_after_reads: fault_after_reads.max(1),
            last_error: None,
        }
    }

    /// Water temperature in whole °C.
    ///
    /// A failed read is logged and the previous good value is retained.
    pub fn water_temp_c(&mut self) -> i16 {
        match self.temperature.read() {
            Ok(reading) => {
                if self.fault().is_some() {
                    info!("Water temperature sensor recovered");
                }
                self.consecutive_failures = 0;
                self.last_error = None;
                self.last_water_temp_c = reading.whole_degrees();
            }
            Err(e) => {
                self.consecutive_failures = self.consecutive_failures.saturating_add(1);
                self.last_error = Some(e);
                warn!(
                    "Water temperature read failed ({}), holding {}°C [{} in a row]",
                    e, self.last_water_temp_c, self.consecutive_failures
                );
            }
        }
        self.last_water_temp_c
    }

    /// Reads failed back-to-back since the last good one.
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    /// The latest read error once the failure run reaches the limit.
    pub fn fault(&self) -> Option<SensorError> {
        if self.consecutive_failures >= self.fault_after_reads {
            self.last_error
        } else {
            None
        }
    }
}
