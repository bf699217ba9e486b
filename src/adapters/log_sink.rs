//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).

use log::{error, info, warn};

use crate::app::events::{AppEvent, Adjustment};
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::Adjusted(Adjustment::Clock(t)) => {
                info!("ADJUST | clock={:02}:{:02}", t.hour, t.minute);
            }
            AppEvent::Adjusted(Adjustment::Alarm(t)) => {
                info!("ADJUST | alarm={:02}:{:02}", t.hour, t.minute);
            }
            AppEvent::Adjusted(Adjustment::Temperature(c)) => {
                info!("ADJUST | target={}\u{00b0}C", c);
            }
            AppEvent::EventsDropped(n) => {
                warn!("QUEUE | {} event(s) dropped", n);
            }
            AppEvent::DrinkReady => {
                info!("BREW | drink ready");
            }
            AppEvent::Fault(e) => {
                error!("FAULT | {}", e);
            }
        }
    }
}
