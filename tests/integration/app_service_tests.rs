//! Integration tests for the AppService → FSM → ports pipeline.
//!
//! These run on the host (x86_64) and verify what leaves the service
//! through each port: actuator calls, rendered frames and app events.

use crate::mock_hw::{ActuatorCall, LogSink, MockDisplay, MockHardware};

use easydrink::app::events::{AppEvent, Adjustment};
use easydrink::app::service::AppService;
use easydrink::clock::ClockTime;
use easydrink::config::SystemConfig;
use easydrink::events::{Event, EventQueue};
use easydrink::fsm::{Reaction, StateId};

fn make_app_with(config: SystemConfig) -> (AppService, MockHardware, MockDisplay, LogSink) {
    let mut hw = MockHardware::new(ClockTime::new(6, 30, 0));
    let mut display = MockDisplay::default();
    let mut sink = LogSink::default();
    let mut app = AppService::new(config, hw.now);
    app.start(&mut hw, &mut display, &mut sink);
    (app, hw, display, sink)
}

fn make_app() -> (AppService, MockHardware, MockDisplay, LogSink) {
    make_app_with(SystemConfig::default())
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_forces_outputs_off_and_shows_standby() {
    let (app, hw, display, sink) = make_app();

    assert_eq!(hw.calls, vec![ActuatorCall::AllOff]);
    assert_eq!(app.state(), StateId::Standby);
    assert_eq!(sink.events, vec![AppEvent::Started(StateId::Standby)]);

    let frame = display.last().expect("first frame drawn");
    assert_eq!(frame.top.as_str(), "06:30:00");
    assert_eq!(frame.bottom.as_str(), "Alarm 07:00");
}

// ── Transitions ───────────────────────────────────────────────

#[test]
fn state_changes_are_reported_with_both_ends() {
    let (mut app, mut hw, mut display, mut sink) = make_app();

    let r = app.handle_event(Event::EncoderPress, &mut hw, &mut display, &mut sink);
    assert_eq!(r, Reaction::Transition(StateId::TimeHour));
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::StateChanged {
            from: StateId::Standby,
            to: StateId::TimeHour,
        })
    );
    assert_eq!(display.last().map(|f| f.bottom.as_str()), Some("[06]:30"));
}

#[test]
fn drink_ready_is_announced_on_entry() {
    let (mut app, mut hw, mut display, mut sink) = make_app();
    app.handle_event(Event::Alarm, &mut hw, &mut display, &mut sink);
    app.handle_event(Event::EncoderPress, &mut hw, &mut display, &mut sink);
    hw.brew_done = true;
    app.handle_event(Event::NextTick, &mut hw, &mut display, &mut sink);

    let n = sink.events.len();
    assert_eq!(
        &sink.events[n - 2..],
        &[
            AppEvent::StateChanged {
                from: StateId::Brewing,
                to: StateId::DrinkDone,
            },
            AppEvent::DrinkReady,
        ]
    );
}

// ── Adjustments ───────────────────────────────────────────────

#[test]
fn heating_target_adjusts_and_saturates() {
    let mut config = SystemConfig::default();
    config.default_temperature_c = 97;
    let (mut app, mut hw, mut display, mut sink) = make_app_with(config);

    app.handle_event(Event::Alarm, &mut hw, &mut display, &mut sink);
    for _ in 0..5 {
        app.handle_event(Event::EncoderInc, &mut hw, &mut display, &mut sink);
    }
    assert_eq!(app.data().temperature, 98);

    let adjusted: Vec<_> = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::Adjusted(_)))
        .collect();
    // Only the step that actually moved the target is reported.
    assert_eq!(adjusted, vec![&AppEvent::Adjusted(Adjustment::Temperature(98))]);
    assert_eq!(display.last().map(|f| f.bottom.as_str()), Some("Target  98C"));
}

#[test]
fn alarm_minute_edit_reports_alarm_not_clock() {
    let (mut app, mut hw, mut display, mut sink) = make_app();
    for _ in 0..4 {
        app.handle_event(Event::EncoderPress, &mut hw, &mut display, &mut sink);
    }
    assert_eq!(app.state(), StateId::AlarmMinute);

    app.handle_event(Event::EncoderDec, &mut hw, &mut display, &mut sink);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::Adjusted(Adjustment::Alarm(ClockTime::new(7, 59, 0))))
    );
    assert_eq!(app.data().curr_time, ClockTime::new(6, 30, 0));
}

// ── Queue draining ────────────────────────────────────────────

#[test]
fn step_processes_events_in_arrival_order() {
    let (mut app, mut hw, mut display, mut sink) = make_app();
    let queue: EventQueue<8> = EventQueue::new();
    for e in [Event::EncoderPress, Event::EncoderInc, Event::EncoderPress] {
        queue.push(e).unwrap();
    }

    assert_eq!(app.step(&queue, &mut hw, &mut display, &mut sink), 3);
    assert_eq!(app.state(), StateId::TimeMinute);
    assert_eq!(app.data().curr_time.hour, 7);
    assert_eq!(app.step(&queue, &mut hw, &mut display, &mut sink), 0);
}

#[test]
fn redraw_repaints_without_touching_state() {
    let (mut app, mut hw, mut display, mut sink) = make_app();
    let before = *app.data();
    let frames = display.frames.len();

    let r = app.handle_event(Event::Redraw, &mut hw, &mut display, &mut sink);
    assert_eq!(r, Reaction::Redraw);
    assert_eq!(*app.data(), before);
    assert_eq!(display.frames.len(), frames + 1);
    assert_eq!(hw.calls, vec![ActuatorCall::AllOff]);
}
