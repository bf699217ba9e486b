//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO registers.  Sensor readings are
//! plain fields the test flips between events.

use easydrink::app::events::AppEvent;
use easydrink::app::ports::{
    ActuatorPort, AlarmPort, ClockPort, DisplayPort, EventSink, SensorPort,
};
use easydrink::clock::ClockTime;
use easydrink::error::{ActuatorError, SensorError};
use easydrink::fsm::views::Frame;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    StartHeating,
    StopHeating,
    StartBrewing,
    StopBrewing,
    DrinkReady(bool),
    AllOff,
}

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    pub calls: Vec<ActuatorCall>,
    pub now: ClockTime,
    pub water_temp_c: i16,
    pub brew_done: bool,
    pub sensor_fault: Option<SensorError>,
    pub armed: Option<ClockTime>,
    pub clock_writes: Vec<ClockTime>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(now: ClockTime) -> Self {
        Self {
            calls: Vec::new(),
            now,
            water_temp_c: 20,
            brew_done: false,
            sensor_fault: None,
            armed: None,
            clock_writes: Vec::new(),
        }
    }

    pub fn count(&self, call: &ActuatorCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn heater_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::StartHeating => Some(true),
                ActuatorCall::StopHeating | ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn pump_on(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::StartBrewing => Some(true),
                ActuatorCall::StopBrewing | ActuatorCall::AllOff => Some(false),
                _ => None,
            })
            .unwrap_or(false)
    }
}

impl ClockPort for MockHardware {
    fn read_current_time(&mut self) -> ClockTime {
        self.now
    }

    fn set_time(&mut self, time: ClockTime) {
        self.now = time;
        self.clock_writes.push(time);
    }
}

impl SensorPort for MockHardware {
    fn current_temperature(&mut self) -> i16 {
        self.water_temp_c
    }

    fn is_brew_done(&mut self) -> bool {
        self.brew_done
    }

    fn sensor_fault(&mut self) -> Option<SensorError> {
        self.sensor_fault
    }
}

impl ActuatorPort for MockHardware {
    fn start_heating(&mut self) {
        self.calls.push(ActuatorCall::StartHeating);
    }

    fn stop_heating(&mut self) {
        self.calls.push(ActuatorCall::StopHeating);
    }

    fn start_brewing(&mut self) -> Result<(), ActuatorError> {
        self.calls.push(ActuatorCall::StartBrewing);
        Ok(())
    }

    fn stop_brewing(&mut self) {
        self.calls.push(ActuatorCall::StopBrewing);
    }

    fn signal_drink_ready(&mut self, on: bool) {
        self.calls.push(ActuatorCall::DrinkReady(on));
    }

    fn all_off(&mut self) {
        self.calls.push(ActuatorCall::AllOff);
    }
}

impl AlarmPort for MockHardware {
    fn arm(&mut self, at: ClockTime) {
        self.armed = Some(at);
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub frames: Vec<Frame>,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl DisplayPort for MockDisplay {
    fn render(&mut self, frame: &Frame) {
        self.frames.push(frame.clone());
    }
}

// ── LogSink ───────────────────────────────────────────────────

#[derive(Default)]
pub struct LogSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
