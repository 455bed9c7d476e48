//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  StateTable                                                       │
//! │  ┌──────────┬──────────┬──────────┬───────────────┬─────────────┐ │
//! │  │ Mode     │ on_enter │ on_exit  │ on_update     │ on_event    │ │
//! │  ├──────────┼──────────┼──────────┼───────────────┼─────────────┤ │
//! │  │ Setup    │ fn(ctx)  │ fn(ctx)  │ fn(ctx)->Opt  │ fn(ctx,ev)  │ │
//! │  │ Idle     │    ..    │    ..    │      ..       │     ..      │ │
//! │  │ Editable │    ..    │    ..    │      ..       │     ..      │ │
//! │  │ Armed    │    ..    │    ..    │      ..       │     ..      │ │
//! │  │ Running  │    ..    │    ..    │      ..       │     ..      │ │
//! │  │ Paused   │    ..    │    ..    │      ..       │     ..      │ │
//! │  │ Secret   │    ..    │    ..    │      ..       │     ..      │ │
//! │  └──────────┴──────────┴──────────┴───────────────┴─────────────┘ │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each loop iteration the service calls [`Fsm::tick`], which runs
//! `on_update` for the current mode (only `Setup` and `Secret` use it),
//! then [`Fsm::dispatch`] once per queued [`Event`].  When a handler returns
//! `Some(next)` the engine runs `on_exit` for the current mode, recomputes
//! the relay level from the target mode, and runs `on_enter` for the next.
//! Re-entering the current mode is a full transition too: exit and entry
//! actions run again.

pub mod context;
pub mod states;

use context::TimerContext;
use log::info;

use crate::events::Event;

// ---------------------------------------------------------------------------
// Mode identity
// ---------------------------------------------------------------------------

/// Operating mode of the timer.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mode {
    Setup = 0,
    Idle = 1,
    Editable = 2,
    Armed = 3,
    Running = 4,
    Paused = 5,
    Secret = 6,
}

impl Mode {
    /// Total number of modes, used to size the table array.
    pub const COUNT: usize = 7;

    pub fn name(self) -> &'static str {
        match self {
            Self::Setup => "Setup",
            Self::Idle => "Idle",
            Self::Editable => "Editable",
            Self::Armed => "Armed",
            Self::Running => "Running",
            Self::Paused => "Paused",
            Self::Secret => "Secret",
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each transition.
pub type StateActionFn = fn(&mut TimerContext);

/// Per-iteration handler.  Returns `Some(next)` to transition.
pub type StateUpdateFn = fn(&mut TimerContext) -> Option<Mode>;

/// Event handler.  Returns `Some(next)` to transition; `None` to stay
/// (the event may still have mutated the context).
pub type StateEventFn = fn(&mut TimerContext, Event) -> Option<Mode>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single mode.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: Mode,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
    pub on_event: StateEventFn,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table and the index of the active mode.  The mutable
/// [`TimerContext`] is threaded through every handler call.
pub struct Fsm {
    /// Fixed-size table indexed by `Mode as usize`.
    table: [StateDescriptor; Mode::COUNT],
    /// Index of the currently active mode.
    current: usize,
    /// Transitions taken since construction (wrapping).
    transitions: u32,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; Mode::COUNT], initial: Mode) -> Self {
        Self {
            table,
            current: initial as usize,
            transitions: 0,
        }
    }

    /// Run the initial `on_enter` and apply the relay rule for the starting
    /// mode.  Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut TimerContext) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        ctx.relay_on = self.current_mode() == Mode::Running;
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }

    /// Evaluate the current mode's `on_update` and take any transition it
    /// requests.  Returns the transition as `(from, to)`.
    pub fn tick(&mut self, ctx: &mut TimerContext) -> Option<(Mode, Mode)> {
        let next = (self.table[self.current].on_update)(ctx)?;
        Some(self.transition(next, ctx))
    }

    /// Deliver one event to the current mode's `on_event`.
    pub fn dispatch(&mut self, event: Event, ctx: &mut TimerContext) -> Option<(Mode, Mode)> {
        let next = (self.table[self.current].on_event)(ctx, event)?;
        Some(self.transition(next, ctx))
    }

    /// Jump straight to `next`, running exit and entry actions.
    /// A no-op when already in `next`.
    pub fn force_transition(&mut self, next: Mode, ctx: &mut TimerContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The active mode.
    pub fn current_mode(&self) -> Mode {
        self.table[self.current].id
    }

    /// Total transitions taken since construction.
    pub fn transitions(&self) -> u32 {
        self.transitions
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: Mode, ctx: &mut TimerContext) -> (Mode, Mode) {
        let from = self.current_mode();
        let next_idx = next as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        // Exit current mode
        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;
        self.transitions = self.transitions.wrapping_add(1);
        ctx.previous = from;

        // The relay follows the mode on every transition, whatever the path.
        ctx.relay_on = next == Mode::Running;

        // Enter new mode
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }

        (from, next)
    }
}
