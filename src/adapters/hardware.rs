//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the software RTC, the [`SensorHub`], the alarm comparator and all
//! actuator drivers, exposing them through [`ClockPort`], [`SensorPort`],
//! [`ActuatorPort`] and [`AlarmPort`].  This is the only module in the
//! system that touches actual hardware.
//!
//! A sensor fault reported by the hub latches the heater off at the
//! driver, independent of what the state machine asks for.  On non-espidf targets, the
//! underlying drivers use cfg-gated simulation stubs.

use log::{error, info};

use crate::adapters::time::SoftRtc;
use crate::app::ports::{ActuatorPort, AlarmPort, ClockPort, SensorPort};
use crate::clock::ClockTime;
use crate::drivers::alarm::AlarmComparator;
use crate::drivers::heater::{HeaterDriver, HeaterState};
use crate::drivers::hw_init;
use crate::drivers::pump::PumpDriver;
use crate::drivers::ready_led::ReadyLed;
use crate::error::{ActuatorError, SensorError};
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    rtc: SoftRtc,
    sensor_hub: SensorHub,
    alarm: AlarmComparator,
    heater: HeaterDriver,
    pump: PumpDriver,
    ready: ReadyLed,
}

impl HardwareAdapter {
    pub fn new(rtc: SoftRtc, sensor_hub: SensorHub, pump: PumpDriver) -> Self {
        Self {
            rtc,
            sensor_hub,
            alarm: AlarmComparator::new(),
            heater: HeaterDriver::new(),
            pump,
            ready: ReadyLed::new(),
        }
    }

    /// Compare the clock against the armed alarm.  `true` once per
    /// matching minute; the caller pushes `Event::Alarm`.
    pub fn poll_alarm(&mut self) -> bool {
        let now = self.rtc.read_current_time();
        let fired = self.alarm.check(now);
        if fired {
            info!("Alarm comparator fired at {}", now);
        }
        fired
    }

    /// Start the pump unless the heater is still energised.
    pub fn try_start_brewing(&mut self, now_ms: u32) -> Result<(), ActuatorError> {
        if self.heater.is_on() {
            return Err(ActuatorError::HeaterStillOn);
        }
        self.pump.start(now_ms);
        Ok(())
    }

    pub fn heater_on(&self) -> bool {
        self.heater.is_on()
    }

    pub fn heater_faulted(&self) -> bool {
        matches!(self.heater.state(), HeaterState::Faulted(_))
    }

    pub fn pump_running(&self) -> bool {
        self.pump.is_running()
    }

    pub fn drink_ready(&self) -> bool {
        self.ready.is_on()
    }
}

// ── ClockPort implementation ──────────────────────────────────

impl ClockPort for HardwareAdapter {
    fn read_current_time(&mut self) -> ClockTime {
        self.rtc.read_current_time()
    }

    fn set_time(&mut self, time: ClockTime) {
        self.rtc.set_time(time);
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn current_temperature(&mut self) -> i16 {
        self.sensor_hub.water_temp_c()
    }

    fn is_brew_done(&mut self) -> bool {
        self.pump.is_done(hw_init::uptime_ms())
    }

    fn sensor_fault(&mut self) -> Option<SensorError> {
        let fault = self.sensor_hub.fault();
        match (fault, self.heater_faulted()) {
            (Some(e), false) => {
                error!(
                    "Water temperature sensor fault after {} failed reads: {}",
                    self.sensor_hub.consecutive_failures(),
                    e
                );
                self.heater.fault_shutdown("water temperature sensor");
            }
            (None, true) => {
                info!("Heater fault cleared");
                self.heater.clear_fault();
            }
            _ => {}
        }
        fault
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn start_heating(&mut self) {
        self.heater.enable();
    }

    fn stop_heating(&mut self) {
        self.heater.disable();
    }

    fn start_brewing(&mut self) -> Result<(), ActuatorError> {
        self.try_start_brewing(hw_init::uptime_ms())
    }

    fn stop_brewing(&mut self) {
        self.pump.stop();
    }

    fn signal_drink_ready(&mut self, on: bool) {
        self.ready.set(on);
    }

    fn all_off(&mut self) {
        self.heater.disable();
        self.pump.stop();
        self.ready.off();
    }
}

// ── AlarmPort implementation ──────────────────────────────────

impl AlarmPort for HardwareAdapter {
    fn arm(&mut self, at: ClockTime) {
        self.alarm.arm(at);
    }
}
