//! End-to-end user journeys through the event queue.
//!
//! Events are pushed onto a local queue the way the timer and encoder do
//! on hardware, then drained with `AppService::step`.

use crate::mock_hw::{ActuatorCall, LogSink, MockDisplay, MockHardware};

use easydrink::app::events::AppEvent;
use easydrink::app::service::AppService;
use easydrink::clock::ClockTime;
use easydrink::config::SystemConfig;
use easydrink::error::{Error, SensorError};
use easydrink::events::{Event, EventQueue};
use easydrink::fsm::StateId;

type Queue = EventQueue<16>;

struct Rig {
    app: AppService,
    hw: MockHardware,
    display: MockDisplay,
    sink: LogSink,
    queue: Queue,
}

impl Rig {
    fn new(now: ClockTime) -> Self {
        let mut hw = MockHardware::new(now);
        let mut display = MockDisplay::default();
        let mut sink = LogSink::default();
        let mut app = AppService::new(SystemConfig::default(), now);
        app.start(&mut hw, &mut display, &mut sink);
        Self {
            app,
            hw,
            display,
            sink,
            queue: Queue::new(),
        }
    }

    fn feed(&mut self, events: &[Event]) {
        for &e in events {
            self.queue.push(e).unwrap();
        }
        self.app
            .step(&self.queue, &mut self.hw, &mut self.display, &mut self.sink);
    }

    fn tick(&mut self) {
        self.feed(&[Event::NextTick]);
    }
}

// ── Scenario 1: set clock, walk through alarm, back to standby ──

#[test]
fn setting_the_clock_hour_commits_on_return_to_standby() {
    let mut rig = Rig::new(ClockTime::new(9, 15, 0));

    rig.feed(&[Event::EncoderPress]);
    assert_eq!(rig.app.state(), StateId::TimeHour);

    rig.feed(&[Event::EncoderInc, Event::EncoderInc, Event::EncoderInc]);
    assert_eq!(rig.app.data().curr_time.hour, 12);
    assert!(rig.hw.clock_writes.is_empty(), "nothing committed mid-edit");

    rig.feed(&[Event::EncoderPress]);
    assert_eq!(rig.app.state(), StateId::TimeMinute);
    rig.feed(&[Event::EncoderPress]);
    assert_eq!(rig.app.state(), StateId::AlarmHour);
    rig.feed(&[Event::EncoderPress]);
    assert_eq!(rig.app.state(), StateId::AlarmMinute);
    rig.feed(&[Event::EncoderPress]);
    assert_eq!(rig.app.state(), StateId::Standby);

    let expected = ClockTime::new(12, 15, 0);
    assert_eq!(rig.app.data().curr_time, expected);
    assert_eq!(rig.hw.clock_writes, vec![expected]);
    assert_eq!(rig.app.data().alarm_time, SystemConfig::default().default_alarm);
    assert_eq!(rig.hw.armed, Some(SystemConfig::default().default_alarm));
    assert_eq!(rig.app.data().temperature, SystemConfig::default().default_temperature_c);
}

#[test]
fn hour_edit_wraps_past_midnight() {
    let mut rig = Rig::new(ClockTime::new(22, 0, 0));
    rig.feed(&[Event::EncoderPress]);
    rig.feed(&[Event::EncoderInc, Event::EncoderInc, Event::EncoderInc]);
    assert_eq!(rig.app.data().curr_time.hour, 1);
}

// ── Scenario 2: alarm → heat until target → brew ─────────────

#[test]
fn alarm_heats_until_target_then_brews_once() {
    let mut rig = Rig::new(ClockTime::new(7, 0, 0));
    let target = rig.app.data().temperature;

    rig.feed(&[Event::Alarm]);
    assert_eq!(rig.app.state(), StateId::Heating);
    assert!(rig.hw.heater_on());

    for temp in [20, 45, 70, target - 1] {
        rig.hw.water_temp_c = temp;
        rig.tick();
        assert_eq!(rig.app.state(), StateId::Heating, "still heating at {}C", temp);
    }
    assert_eq!(rig.hw.count(&ActuatorCall::StartBrewing), 0);

    rig.hw.water_temp_c = target;
    rig.tick();
    assert_eq!(rig.app.state(), StateId::Brewing);
    assert!(!rig.hw.heater_on());
    assert!(rig.hw.pump_on());

    // Further ticks while brewing never restart the pump.
    rig.tick();
    rig.tick();
    assert_eq!(rig.hw.count(&ActuatorCall::StartBrewing), 1);

    // Heater is switched off before the pump is switched on.
    let stop = rig.hw.calls.iter().position(|c| *c == ActuatorCall::StopHeating);
    let start = rig.hw.calls.iter().position(|c| *c == ActuatorCall::StartBrewing);
    assert!(stop < start);
}

// ── Scenario 3: brewing ignores the encoder ──────────────────

#[test]
fn brewing_ignores_encoder_until_brew_done() {
    let mut rig = Rig::new(ClockTime::new(7, 0, 0));
    rig.feed(&[Event::Alarm]);
    rig.hw.water_temp_c = 99;
    rig.tick();
    assert_eq!(rig.app.state(), StateId::Brewing);

    let before = *rig.app.data();
    let frames = rig.display.frames.len();
    rig.feed(&[Event::EncoderInc, Event::EncoderDec, Event::EncoderPress]);
    assert_eq!(rig.app.state(), StateId::Brewing);
    assert_eq!(*rig.app.data(), before);
    assert_eq!(rig.display.frames.len(), frames, "ignored events do not redraw");

    rig.tick();
    assert_eq!(rig.app.state(), StateId::Brewing);

    rig.hw.brew_done = true;
    rig.tick();
    assert_eq!(rig.app.state(), StateId::DrinkDone);
    assert!(!rig.hw.pump_on());
    assert_eq!(rig.hw.calls.last(), Some(&ActuatorCall::DrinkReady(true)));
    assert_eq!(
        rig.display.last().map(|f| f.top.as_str()),
        Some("Drink ready!")
    );

    rig.feed(&[Event::EncoderPress]);
    assert_eq!(rig.app.state(), StateId::Standby);
    assert_eq!(rig.hw.calls.last(), Some(&ActuatorCall::DrinkReady(false)));
}

// ── Scenario 4: thermistor fails during heat-up ──────────────

#[test]
fn sensor_fault_during_heating_returns_to_standby() {
    let mut rig = Rig::new(ClockTime::new(7, 0, 0));
    rig.feed(&[Event::Alarm]);
    rig.hw.water_temp_c = 60;
    rig.tick();
    assert_eq!(rig.app.state(), StateId::Heating);

    rig.hw.sensor_fault = Some(SensorError::AdcReadFailed);
    rig.tick();
    assert_eq!(rig.app.state(), StateId::Standby);
    assert!(!rig.hw.heater_on());
    assert_eq!(rig.hw.count(&ActuatorCall::StartBrewing), 0);
    assert!(rig
        .sink
        .events
        .contains(&AppEvent::Fault(Error::Sensor(SensorError::AdcReadFailed))));

    rig.feed(&[Event::Alarm]);
    assert_eq!(rig.app.state(), StateId::Standby);
}
