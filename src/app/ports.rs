//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (clock, sensors, actuators, display, event sinks)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! Input producers are not ports: the encoder poller, tick timer and alarm
//! comparator only ever call [`push_event`](crate::events::push_event).

use crate::clock::ClockTime;
use crate::error::{ActuatorError, SensorError};
use crate::fsm::context::SensorSnapshot;
use crate::fsm::views::Frame;

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: RTC ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Wall-clock source.
pub trait ClockPort {
    fn read_current_time(&mut self) -> ClockTime;

    /// Overwrite the clock with a user-edited time.
    fn set_time(&mut self, time: ClockTime);
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort: ClockPort {
    /// Water temperature in whole °C.
    fn current_temperature(&mut self) -> i16;

    /// `true` once the brew cycle started by `start_brewing` has finished.
    fn is_brew_done(&mut self) -> bool;

    /// `Some` while the temperature reading cannot be trusted.  Checked
    /// after `current_temperature` on every snapshot.
    fn sensor_fault(&mut self) -> Option<SensorError>;

    /// Read every input and return a unified snapshot.
    /// Called before each NEXT_TICK is dispatched.
    fn read_all(&mut self) -> SensorSnapshot {
        SensorSnapshot {
            now: self.read_current_time(),
            water_temp_c: self.current_temperature(),
            brew_done: self.is_brew_done(),
            sensor_fault: self.sensor_fault(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to command actuators.
pub trait ActuatorPort {
    /// Energise the heating element.
    fn start_heating(&mut self);

    fn stop_heating(&mut self);

    /// Start the pump and its brew timer.  Refused while the heater is on.
    fn start_brewing(&mut self) -> Result<(), ActuatorError>;

    fn stop_brewing(&mut self);

    /// Drive the "drink ready" indicator (`false` clears it).
    fn signal_drink_ready(&mut self, on: bool);

    /// Kill all actuators (heater, pump, indicator) for a safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Alarm port (driven adapter: domain → alarm comparator)
// ───────────────────────────────────────────────────────────────

/// Receives the alarm time once the user commits it.
pub trait AlarmPort {
    fn arm(&mut self, at: ClockTime);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → screen)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    fn render(&mut self, frame: &Frame);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
