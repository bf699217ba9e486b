//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the FSM and its context.  It exposes a clean,
//! hardware-agnostic API.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!   EventQueue ──▶ ┌────────────────────────┐ ──▶ EventSink
//!   SensorPort ──▶ │      AppService        │ ──▶ DisplayPort
//! ActuatorPort ◀── │  FSM · StateData       │ ──▶ AlarmPort
//!                  └────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::clock::ClockTime;
use crate::config::SystemConfig;
use crate::error::{ActuatorError, Error};
use crate::events::{Event, EventQueue};
use crate::fsm::context::{ActuatorCommands, FsmContext, StateData};
use crate::fsm::states::build_state_table;
use crate::fsm::views::Frame;
use crate::fsm::{AdjustMode, Fsm, Reaction, StateId};

use super::events::{AppEvent, Adjustment};
use super::ports::{ActuatorPort, AlarmPort, DisplayPort, EventSink, SensorPort};

// ───────────────────────────────────────────────────────────────
// AppService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates all domain logic.
pub struct AppService {
    fsm: Fsm,
    ctx: FsmContext,
    /// Actuator levels last written to the hardware.
    applied: ActuatorCommands,
    events_handled: u64,
}

impl AppService {
    /// Construct the service from configuration, clock seeded with `now`.
    ///
    /// Does **not** start the FSM; call [`start`](Self::start) next.
    pub fn new(config: SystemConfig, now: ClockTime) -> Self {
        let ctx = FsmContext::new(config, now);
        let fsm = Fsm::new(build_state_table());

        Self {
            fsm,
            ctx,
            applied: ActuatorCommands::all_off(),
            events_handled: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Put the hardware in a known state, arm the default alarm, run the
    /// initial state's entry hook and draw the first frame.
    pub fn start<H>(&mut self, hw: &mut H, display: &mut impl DisplayPort, sink: &mut impl EventSink)
    where
        H: SensorPort + ActuatorPort + AlarmPort,
    {
        hw.all_off();
        self.applied = ActuatorCommands::all_off();
        hw.arm(self.ctx.data.alarm_time);

        self.fsm.start(&mut self.ctx);
        sink.emit(&AppEvent::Started(self.state()));
        if let Err(e) = self.apply_actuators(hw) {
            self.abort_to_standby(e.into(), hw, sink);
        }
        display.render(&self.frame());

        info!(
            "AppService started in {} at {}, alarm {}",
            self.fsm.name(self.state()),
            self.ctx.data.curr_time,
            self.ctx.data.alarm_time
        );
    }

    // ── Event handling ────────────────────────────────────────

    /// Dispatch one event: refresh sensors (NEXT_TICK only) → FSM →
    /// commits → actuators → display → sink.
    ///
    /// `hw` satisfies every hardware port at once.
    pub fn handle_event<H>(
        &mut self,
        event: Event,
        hw: &mut H,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> Reaction
    where
        H: SensorPort + ActuatorPort + AlarmPort,
    {
        self.events_handled += 1;

        // 1. Sensors are polled only for the heartbeat
        if event == Event::NextTick {
            let fault_before = self.ctx.sensors.sensor_fault;
            self.ctx.sensors = hw.read_all();
            if let (None, Some(e)) = (fault_before, self.ctx.sensors.sensor_fault) {
                warn!("Sensor fault: {}", e);
                sink.emit(&AppEvent::Fault(e.into()));
            }
        }

        // 2. FSM
        let prev_state = self.state();
        let prev_data = self.ctx.data;
        let reaction = self.fsm.dispatch(event, &mut self.ctx);

        // 3. One-shot commits, then level-triggered actuators
        self.apply_commits(hw);
        if let Err(e) = self.apply_actuators(hw) {
            self.abort_to_standby(e.into(), hw, sink);
        }

        // 4. Display
        if reaction != Reaction::Ignored {
            display.render(&self.frame());
        }

        // 5. Outbound events
        let new_state = self.state();
        if new_state != prev_state {
            sink.emit(&AppEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
            if new_state == StateId::DrinkDone {
                sink.emit(&AppEvent::DrinkReady);
            }
        } else if reaction == Reaction::Handled {
            if let Some(adj) = adjustment(prev_state.adjust_mode(), &prev_data, &self.ctx.data) {
                sink.emit(&AppEvent::Adjusted(adj));
            }
        }

        reaction
    }

    /// Drain `queue` through [`handle_event`](Self::handle_event), reporting
    /// any overflow first.  Returns the number of events processed.
    pub fn step<const N: usize, H>(
        &mut self,
        queue: &EventQueue<N>,
        hw: &mut H,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> usize
    where
        H: SensorPort + ActuatorPort + AlarmPort,
    {
        let dropped = queue.take_dropped();
        if dropped > 0 {
            warn!("Event queue overflow: {} event(s) dropped", dropped);
            sink.emit(&AppEvent::EventsDropped(dropped));
        }

        let mut processed = 0;
        while let Some(event) = queue.pop() {
            self.handle_event(event, hw, display, sink);
            processed += 1;
        }
        processed
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.ctx.data.state
    }

    pub fn data(&self) -> &StateData {
        &self.ctx.data
    }

    /// Actuator levels the FSM currently requests.
    pub fn commands(&self) -> &ActuatorCommands {
        &self.ctx.commands
    }

    pub fn config(&self) -> &SystemConfig {
        &self.ctx.config
    }

    /// NEXT_TICKs since the current state was entered.
    pub fn ticks_in_state(&self) -> u32 {
        self.fsm.ticks_in_current_state(&self.ctx)
    }

    /// Events dispatched since startup (including ignored ones).
    pub fn events_handled(&self) -> u64 {
        self.events_handled
    }

    /// Render the current state's view.
    pub fn frame(&self) -> Frame {
        self.fsm.render(&self.ctx.data)
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_commits(&mut self, hw: &mut (impl SensorPort + AlarmPort)) {
        if let Some(time) = self.ctx.commands.clock_commit.take() {
            hw.set_time(time);
            self.ctx.sensors.now = time;
            info!("Clock set to {}", time);
        }
        if let Some(at) = self.ctx.commands.alarm_commit.take() {
            hw.arm(at);
            info!("Alarm armed for {:02}:{:02}", at.hour, at.minute);
        }
    }

    /// Report `err`, then leave the current state for standby so its exit
    /// hook switches the outputs off.
    fn abort_to_standby(&mut self, err: Error, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        warn!("{} in {}, returning to standby", err, self.fsm.name(self.state()));
        sink.emit(&AppEvent::Fault(err));
        self.fsm.force_transition(StateId::Standby, &mut self.ctx);
        // Standby turns every output off, which cannot be refused.
        if let Err(e) = self.apply_actuators(hw) {
            warn!("Actuator refused while stopping: {}", e);
        }
    }

    /// Translate FSM actuator levels into port calls on each edge.
    /// Every "off" edge is applied before any "on" edge so the heater and
    /// pump are never energised together.  A refused pump start is
    /// recorded as off and returned.
    fn apply_actuators(&mut self, hw: &mut impl ActuatorPort) -> Result<(), ActuatorError> {
        let want = self.ctx.commands;
        let have = self.applied;

        // ── Off edges ────────────────────────────────────────
        if have.heater_on && !want.heater_on {
            hw.stop_heating();
        }
        if have.pump_on && !want.pump_on {
            hw.stop_brewing();
        }
        if have.drink_ready && !want.drink_ready {
            hw.signal_drink_ready(false);
        }

        // ── On edges ─────────────────────────────────────────
        if !have.heater_on && want.heater_on {
            hw.start_heating();
        }
        let mut result = Ok(());
        if !have.pump_on && want.pump_on {
            result = hw.start_brewing();
        }
        if !have.drink_ready && want.drink_ready {
            hw.signal_drink_ready(true);
        }

        self.applied = ActuatorCommands {
            pump_on: want.pump_on && result.is_ok(),
            clock_commit: None,
            alarm_commit: None,
            ..want
        };
        result
    }
}

/// Which setting an in-place update changed, if any.
fn adjustment(mode: AdjustMode, before: &StateData, after: &StateData) -> Option<Adjustment> {
    let adj = match mode {
        AdjustMode::None => return None,
        AdjustMode::Temperature => Adjustment::Temperature(after.temperature),
        AdjustMode::Hours | AdjustMode::Minutes if after.alarm_time != before.alarm_time => {
            Adjustment::Alarm(after.alarm_time)
        }
        AdjustMode::Hours | AdjustMode::Minutes => Adjustment::Clock(after.curr_time),
    };
    if after == before {
        return None;
    }
    debug!("Adjusted: {:?}", adj);
    Some(adj)
}
