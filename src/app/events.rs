//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::clock::ClockTime;
use crate::error::Error;
use crate::fsm::StateId;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The application service has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The encoder changed a setting.
    Adjusted(Adjustment),

    /// The event queue overflowed since the last report.
    EventsDropped(u32),

    /// Brewing finished; the cup is waiting.
    DrinkReady,

    /// A sensor or actuator failed; outputs were made safe.
    Fault(Error),
}

/// The field an encoder detent changed and its new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Clock(ClockTime),
    Alarm(ClockTime),
    Temperature(i16),
}
