//! Concrete state handler functions and table builder.
//!
//! Each state is a row of plain `fn` pointers; the table lives on the
//! stack.
//!
//! ```text
//!             ┌────────[press]────────┐
//!             ▼                       │
//!  STANDBY ──[press]──▶ TIME_HOUR ──▶ TIME_MINUTE ──▶ ALARM_HOUR ──▶ ALARM_MINUTE
//!     │  ▲                                                              (commit)
//!  [alarm] └──────────────[press]── DRINK_DONE
//!     ▼                                 ▲
//!  HEATING ──[at target | press]──▶ BREWING ──[brew done]──┘
//! ```
//!
//! Anything a handler does not match is `Reaction::Ignored` and leaves the
//! context untouched.

use super::context::FsmContext;
use super::{Reaction, StateDescriptor, StateId, views};
use crate::events::Event;
use log::{debug, info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Standby
        StateDescriptor {
            id: StateId::Standby,
            name: "Standby",
            on_enter: None,
            on_exit: None,
            handler: standby_handle,
            view: views::standby,
        },
        // Index 1 — TimeHour
        StateDescriptor {
            id: StateId::TimeHour,
            name: "TimeHour",
            on_enter: None,
            on_exit: None,
            handler: time_hour_handle,
            view: views::time_hour,
        },
        // Index 2 — TimeMinute
        StateDescriptor {
            id: StateId::TimeMinute,
            name: "TimeMinute",
            on_enter: None,
            on_exit: None,
            handler: time_minute_handle,
            view: views::time_minute,
        },
        // Index 3 — AlarmHour
        StateDescriptor {
            id: StateId::AlarmHour,
            name: "AlarmHour",
            on_enter: None,
            on_exit: None,
            handler: alarm_hour_handle,
            view: views::alarm_hour,
        },
        // Index 4 — AlarmMinute
        StateDescriptor {
            id: StateId::AlarmMinute,
            name: "AlarmMinute",
            on_enter: None,
            on_exit: Some(alarm_minute_exit),
            handler: alarm_minute_handle,
            view: views::alarm_minute,
        },
        // Index 5 — Heating
        StateDescriptor {
            id: StateId::Heating,
            name: "Heating",
            on_enter: Some(heating_enter),
            on_exit: Some(heating_exit),
            handler: heating_handle,
            view: views::heating,
        },
        // Index 6 — Brewing
        StateDescriptor {
            id: StateId::Brewing,
            name: "Brewing",
            on_enter: Some(brewing_enter),
            on_exit: Some(brewing_exit),
            handler: brewing_handle,
            view: views::brewing,
        },
        // Index 7 — DrinkDone
        StateDescriptor {
            id: StateId::DrinkDone,
            name: "DrinkDone",
            on_enter: Some(drink_done_enter),
            on_exit: Some(drink_done_exit),
            handler: drink_done_handle,
            view: views::drink_done,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  STANDBY state — showing the clock, waiting for the alarm
// ═══════════════════════════════════════════════════════════════════════════

fn standby_handle(ctx: &mut FsmContext, event: Event) -> Reaction {
    match event {
        Event::EncoderPress => Reaction::Transition(StateId::TimeHour),
        Event::Alarm => match ctx.sensors.sensor_fault {
            Some(e) => {
                warn!("STANDBY: alarm at {} skipped, sensor fault: {}", ctx.sensors.now, e);
                Reaction::Ignored
            }
            None => {
                info!("STANDBY: alarm at {}, starting heat-up", ctx.sensors.now);
                Reaction::Transition(StateId::Heating)
            }
        },
        Event::NextTick => {
            ctx.data.curr_time = ctx.sensors.now;
            Reaction::Handled
        }
        _ => Reaction::Ignored,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Setting states — clock hour/minute, then alarm hour/minute
// ═══════════════════════════════════════════════════════════════════════════

fn time_hour_handle(ctx: &mut FsmContext, event: Event) -> Reaction {
    setting_handle(ctx, event, StateId::TimeMinute)
}

fn time_minute_handle(ctx: &mut FsmContext, event: Event) -> Reaction {
    setting_handle(ctx, event, StateId::AlarmHour)
}

fn alarm_hour_handle(ctx: &mut FsmContext, event: Event) -> Reaction {
    setting_handle(ctx, event, StateId::AlarmMinute)
}

fn alarm_minute_handle(ctx: &mut FsmContext, event: Event) -> Reaction {
    setting_handle(ctx, event, StateId::Standby)
}

/// Press advances to `next`; rotation edits the field for the current mode.
/// Alarms and ticks are ignored so an edit in progress is never clobbered.
fn setting_handle(ctx: &mut FsmContext, event: Event, next: StateId) -> Reaction {
    match event {
        Event::EncoderPress => Reaction::Transition(next),
        Event::EncoderInc => adjust(ctx, 1),
        Event::EncoderDec => adjust(ctx, -1),
        _ => Reaction::Ignored,
    }
}

/// Commit the edited clock and alarm on the way back to standby.
fn alarm_minute_exit(ctx: &mut FsmContext) {
    ctx.commands.clock_commit = Some(ctx.data.curr_time);
    ctx.commands.alarm_commit = Some(ctx.data.alarm_time);
    info!(
        "SETTINGS: clock {} alarm {} committed",
        ctx.data.curr_time, ctx.data.alarm_time
    );
}

// ═══════════════════════════════════════════════════════════════════════════
//  HEATING state — element on until the water reaches target
// ═══════════════════════════════════════════════════════════════════════════

fn heating_enter(ctx: &mut FsmContext) {
    ctx.commands.heater_on = true;
    info!(
        "HEATING: target {}°C, water at {}°C",
        ctx.data.temperature, ctx.sensors.water_temp_c
    );
}

fn heating_exit(ctx: &mut FsmContext) {
    ctx.commands.heater_on = false;
}

fn heating_handle(ctx: &mut FsmContext, event: Event) -> Reaction {
    match event {
        // Manual override: brew with whatever heat we have.
        Event::EncoderPress => Reaction::Transition(StateId::Brewing),
        Event::EncoderInc => adjust(ctx, 1),
        Event::EncoderDec => adjust(ctx, -1),
        Event::NextTick if ctx.sensors.sensor_fault.is_some() => {
            warn!("HEATING: temperature unknown, heat-up aborted");
            Reaction::Transition(StateId::Standby)
        }
        Event::NextTick if ctx.at_target_temperature() => {
            info!(
                "HEATING: {}°C reached after {} ticks",
                ctx.sensors.water_temp_c, ctx.ticks_in_state
            );
            Reaction::Transition(StateId::Brewing)
        }
        _ => Reaction::Ignored,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  BREWING state — pump running, all input locked out
// ═══════════════════════════════════════════════════════════════════════════

fn brewing_enter(ctx: &mut FsmContext) {
    ctx.commands.pump_on = true;
    info!("BREWING: pump on for {}s", ctx.config.brew_duration_secs);
}

fn brewing_exit(ctx: &mut FsmContext) {
    ctx.commands.pump_on = false;
}

fn brewing_handle(ctx: &mut FsmContext, event: Event) -> Reaction {
    match event {
        Event::NextTick if ctx.sensors.brew_done => Reaction::Transition(StateId::DrinkDone),
        _ => Reaction::Ignored,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  DRINK_DONE state — waiting for the user to take the cup
// ═══════════════════════════════════════════════════════════════════════════

fn drink_done_enter(ctx: &mut FsmContext) {
    ctx.commands.drink_ready = true;
    info!("DRINK_DONE: drink ready");
}

fn drink_done_exit(ctx: &mut FsmContext) {
    ctx.commands.drink_ready = false;
}

fn drink_done_handle(_ctx: &mut FsmContext, event: Event) -> Reaction {
    match event {
        Event::EncoderPress => Reaction::Transition(StateId::Standby),
        _ => Reaction::Ignored,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Helpers
// ═══════════════════════════════════════════════════════════════════════════

fn adjust(ctx: &mut FsmContext, delta: i8) -> Reaction {
    let mode = ctx.data.state.adjust_mode();
    if ctx.adjust(mode, delta) {
        debug!("{:?} {:+} -> {:?}", mode, delta, ctx.data);
        Reaction::Handled
    } else {
        Reaction::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ClockTime;
    use crate::config::SystemConfig;

    fn ctx_in(state: StateId) -> FsmContext {
        let mut ctx = FsmContext::new(SystemConfig::default(), ClockTime::new(6, 45, 0));
        ctx.data.state = state;
        ctx
    }

    #[test]
    fn every_setting_state_edits_its_own_field() {
        let table = build_state_table();

        let mut ctx = ctx_in(StateId::TimeMinute);
        (table[StateId::TimeMinute as usize].handler)(&mut ctx, Event::EncoderDec);
        assert_eq!(ctx.data.curr_time.minute, 44);

        let mut ctx = ctx_in(StateId::AlarmMinute);
        (table[StateId::AlarmMinute as usize].handler)(&mut ctx, Event::EncoderDec);
        assert_eq!(ctx.data.alarm_time, ClockTime::new(7, 59, 0));
        assert_eq!(ctx.data.curr_time, ClockTime::new(6, 45, 0));
    }

    #[test]
    fn standby_rotation_is_ignored() {
        let mut ctx = ctx_in(StateId::Standby);
        let before = ctx.data;
        assert_eq!(standby_handle(&mut ctx, Event::EncoderInc), Reaction::Ignored);
        assert_eq!(ctx.data, before);
    }

    #[test]
    fn heating_rotation_adjusts_target() {
        let mut ctx = ctx_in(StateId::Heating);
        ctx.sensors.water_temp_c = 20;
        assert_eq!(heating_handle(&mut ctx, Event::EncoderDec), Reaction::Handled);
        assert_eq!(ctx.data.temperature, 84);
        assert_eq!(heating_handle(&mut ctx, Event::NextTick), Reaction::Ignored);
    }

    #[test]
    fn drink_done_only_acknowledges_press() {
        let mut ctx = ctx_in(StateId::DrinkDone);
        for ev in [Event::EncoderInc, Event::Alarm, Event::NextTick] {
            assert_eq!(drink_done_handle(&mut ctx, ev), Reaction::Ignored);
        }
        assert_eq!(
            drink_done_handle(&mut ctx, Event::EncoderPress),
            Reaction::Transition(StateId::Standby)
        );
    }

    #[test]
    fn hooks_are_symmetric() {
        let mut ctx = ctx_in(StateId::Heating);
        heating_enter(&mut ctx);
        heating_exit(&mut ctx);
        brewing_enter(&mut ctx);
        brewing_exit(&mut ctx);
        drink_done_enter(&mut ctx);
        drink_done_exit(&mut ctx);
        assert_eq!(ctx.commands, super::super::context::ActuatorCommands::all_off());
    }
}
