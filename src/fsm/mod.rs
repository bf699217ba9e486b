//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern ported to Rust, driven by queued events:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  StateTable                                                   │
//! │  ┌─────────────┬──────────┬─────────┬────────────┬─────────┐  │
//! │  │ StateId     │ on_enter │ on_exit │ handler    │ view    │  │
//! │  ├─────────────┼──────────┼─────────┼────────────┼─────────┤  │
//! │  │ Standby     │ fn(ctx)  │ -       │ fn(ctx,ev) │ fn(data)│  │
//! │  │ TimeHour    │ -        │ -       │ fn(ctx,ev) │ fn(data)│  │
//! │  │ ...         │          │         │            │         │  │
//! │  │ DrinkDone   │ fn(ctx)  │ fn(ctx) │ fn(ctx,ev) │ fn(data)│  │
//! │  └─────────────┴──────────┴─────────┴────────────┴─────────┘  │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! For each popped event the engine calls `handler` for the **current**
//! state.  If it returns [`Reaction::Transition`], the engine runs
//! `on_exit` for the current state, then `on_enter` for the next, and
//! updates `StateData::state`.  `Redraw` never reaches a handler; it is
//! answered with [`Reaction::Redraw`] so the caller renders the current
//! view.  The current state lives in [`context::StateData`], not in the
//! engine, so there is exactly one copy of it.

pub mod context;
pub mod states;
pub mod views;

use context::{FsmContext, StateData};
use log::{debug, info, trace};
use views::Frame;

use crate::events::Event;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all operating modes, in table order.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Standby = 0,
    TimeHour = 1,
    TimeMinute = 2,
    AlarmHour = 3,
    AlarmMinute = 4,
    Heating = 5,
    Brewing = 6,
    DrinkDone = 7,
}

impl StateId {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 8;

    pub const ALL: [StateId; Self::COUNT] = [
        Self::Standby,
        Self::TimeHour,
        Self::TimeMinute,
        Self::AlarmHour,
        Self::AlarmMinute,
        Self::Heating,
        Self::Brewing,
        Self::DrinkDone,
    ];

    /// Which [`StateData`] field encoder rotation may change in this state.
    pub const fn adjust_mode(self) -> AdjustMode {
        match self {
            Self::TimeHour | Self::AlarmHour => AdjustMode::Hours,
            Self::TimeMinute | Self::AlarmMinute => AdjustMode::Minutes,
            Self::Heating => AdjustMode::Temperature,
            Self::Standby | Self::Brewing | Self::DrinkDone => AdjustMode::None,
        }
    }
}

/// The field encoder increments currently target.  Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustMode {
    None,
    Hours,
    Minutes,
    Temperature,
}

/// What a handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    /// No entry for this (state, event) pair; nothing changed.
    Ignored,
    /// `StateData` was updated in place; state unchanged.
    Handled,
    /// Move to another state.
    Transition(StateId),
    /// Re-render the current view; nothing changed.
    Redraw,
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for the per-event handler.
pub type HandlerFn = fn(&mut FsmContext, Event) -> Reaction;

/// Signature for a state's render routine.  Read-only by construction.
pub type ViewFn = fn(&StateData) -> Frame;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub handler: HandlerFn,
    pub view: ViewFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table; the mutable [`FsmContext`] is threaded through
/// every call.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
}

impl Fsm {
    pub fn new(table: [StateDescriptor; StateId::COUNT]) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id as usize == i),
            "state table out of order"
        );
        Self { table }
    }

    /// Run the `on_enter` of whatever state `ctx` starts in.
    /// Call once after construction, before the first event.
    pub fn start(&self, ctx: &mut FsmContext) {
        let desc = self.descriptor(ctx.data.state);
        info!("FSM starting in state: {}", desc.name);
        if let Some(enter) = desc.on_enter {
            enter(ctx);
        }
    }

    /// Apply one event.
    ///
    /// 1. `NextTick` advances the tick counters.
    /// 2. `Redraw` short-circuits to [`Reaction::Redraw`].
    /// 3. Otherwise the current state's handler runs; a transition executes
    ///    `on_exit(current)` → update state → `on_enter(next)`.
    pub fn dispatch(&self, event: Event, ctx: &mut FsmContext) -> Reaction {
        if event == Event::Redraw {
            return Reaction::Redraw;
        }
        if event == Event::NextTick {
            ctx.total_ticks = ctx.total_ticks.wrapping_add(1);
            ctx.ticks_in_state = ctx.ticks_in_state.saturating_add(1);
        }

        let current = ctx.data.state;
        let reaction = (self.handler(current))(ctx, event);

        match reaction {
            Reaction::Transition(next) if next != current => self.transition(next, ctx),
            Reaction::Transition(_) | Reaction::Handled => {
                debug!("{}: {:?} handled", self.name(current), event);
            }
            Reaction::Ignored | Reaction::Redraw => {
                trace!("{}: {:?} ignored", self.name(current), event);
            }
        }
        reaction
    }

    /// Force an immediate transition, running exit/enter hooks.
    pub fn force_transition(&self, next: StateId, ctx: &mut FsmContext) {
        if next != ctx.data.state {
            self.transition(next, ctx);
        }
    }

    /// Render the current state's view.
    pub fn render(&self, data: &StateData) -> Frame {
        (self.view(data.state))(data)
    }

    /// Handler lookup for `state`.
    pub fn handler(&self, state: StateId) -> HandlerFn {
        self.descriptor(state).handler
    }

    /// View lookup for `state`.
    pub fn view(&self, state: StateId) -> ViewFn {
        self.descriptor(state).view
    }

    pub fn name(&self, state: StateId) -> &'static str {
        self.descriptor(state).name
    }

    /// NEXT_TICKs seen since the current state was entered.
    pub fn ticks_in_current_state(&self, ctx: &FsmContext) -> u32 {
        ctx.ticks_in_state
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn descriptor(&self, state: StateId) -> &StateDescriptor {
        &self.table[state as usize]
    }

    fn transition(&self, next: StateId, ctx: &mut FsmContext) {
        let current = ctx.data.state;
        info!("FSM transition: {} -> {}", self.name(current), self.name(next));

        if let Some(exit) = self.descriptor(current).on_exit {
            exit(ctx);
        }

        ctx.data.state = next;
        ctx.ticks_in_state = 0;

        if let Some(enter) = self.descriptor(next).on_enter {
            enter(ctx);
        }
    }
}
