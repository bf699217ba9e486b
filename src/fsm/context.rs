//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It holds the appliance's [`StateData`] (the only copy of the
//! clock, alarm, target temperature and current mode), the latest sensor
//! snapshot, actuator command outputs, tick counters and configuration.

use crate::clock::ClockTime;
use crate::config::SystemConfig;
use crate::error::SensorError;

use super::{AdjustMode, StateId};

// ---------------------------------------------------------------------------
// StateData (written only by the dispatcher; read by views)
// ---------------------------------------------------------------------------

/// The appliance's source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateData {
    /// Wall-clock time shown in standby and edited in the time-set modes.
    pub curr_time: ClockTime,
    /// When the alarm fires and heating starts.
    pub alarm_time: ClockTime,
    /// Target water temperature (°C).
    pub temperature: i16,
    /// Current operating mode.
    pub state: StateId,
}

impl StateData {
    pub fn new(config: &SystemConfig, now: ClockTime) -> Self {
        Self {
            curr_time: now,
            alarm_time: config.default_alarm,
            temperature: config.default_temperature_c,
            state: StateId::Standby,
        }
    }
}

// ---------------------------------------------------------------------------
// Sensor snapshot (read-only to state handlers; refreshed before NEXT_TICK)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of every input the handlers poll.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorSnapshot {
    /// Time reported by the real-time clock.
    pub now: ClockTime,
    /// Measured water temperature (°C).
    pub water_temp_c: i16,
    /// Brew cycle finished (pump timer elapsed).
    pub brew_done: bool,
    /// Set while the temperature reading cannot be trusted.
    pub sensor_fault: Option<SensorError>,
}

// ---------------------------------------------------------------------------
// Actuator commands (written by state hooks; applied by the app service)
// ---------------------------------------------------------------------------

/// Commands that state hooks write to request actuator actions.
/// The service turns level changes into start/stop calls after every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActuatorCommands {
    /// Heating element energised.
    pub heater_on: bool,
    /// Brew pump running.
    pub pump_on: bool,
    /// "Drink ready" indicator active.
    pub drink_ready: bool,
    /// One-shot: write this time back to the RTC.
    pub clock_commit: Option<ClockTime>,
    /// One-shot: arm the alarm comparator with this time.
    pub alarm_commit: Option<ClockTime>,
}

impl ActuatorCommands {
    /// All actuators off.
    pub fn all_off() -> Self {
        Self::default()
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// NEXT_TICKs seen since the current state was entered.
    pub ticks_in_state: u32,
    /// NEXT_TICKs seen since boot.
    pub total_ticks: u64,

    // -- Appliance state --
    pub data: StateData,

    // -- Sensor data --
    /// Latest sensor readings.  Updated before each NEXT_TICK.
    pub sensors: SensorSnapshot,

    // -- Actuator outputs --
    pub commands: ActuatorCommands,

    // -- Configuration --
    pub config: SystemConfig,
}

impl FsmContext {
    /// Create a context in `Standby`, clock seeded with `now`.
    pub fn new(config: SystemConfig, now: ClockTime) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            data: StateData::new(&config, now),
            sensors: SensorSnapshot {
                now,
                ..SensorSnapshot::default()
            },
            commands: ActuatorCommands::all_off(),
            config,
        }
    }

    /// Apply one encoder detent (`delta` = ±1) to the field selected by
    /// `mode`.  Hours and minutes wrap; temperature saturates at the
    /// configured limits.  Returns `false` when `mode` is `None`.
    pub fn adjust(&mut self, mode: AdjustMode, delta: i8) -> bool {
        match mode {
            AdjustMode::None => return false,
            AdjustMode::Hours => self.edited_time().step_hour(delta),
            AdjustMode::Minutes => self.edited_time().step_minute(delta),
            AdjustMode::Temperature => {
                let step = self.config.temperature_step_c * i16::from(delta);
                self.data.temperature = self
                    .data
                    .temperature
                    .saturating_add(step)
                    .clamp(self.config.min_temperature_c, self.config.max_temperature_c);
            }
        }
        true
    }

    /// The clock in the time-set modes, the alarm in the alarm-set modes.
    fn edited_time(&mut self) -> &mut ClockTime {
        if matches!(self.data.state, StateId::AlarmHour | StateId::AlarmMinute) {
            &mut self.data.alarm_time
        } else {
            &mut self.data.curr_time
        }
    }

    /// Water has reached the target temperature.
    pub fn at_target_temperature(&self) -> bool {
        self.sensors.water_temp_c >= self.data.temperature
    }
}
