//! Tagged events delivered into the state machine.
//!
//! Events are produced by:
//! - the debounced buttons (confirm, start, stop)
//! - the encoder tracker (signed detent count since the last poll)
//! - the countdown counter (`Tick`, `NaturalStop`)
//! - the blink counter (`BlinkTick`)
//!
//! They are gathered into an [`EventQueue`] during one loop iteration and
//! drained in FIFO order by the timer service.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Countdown   │────▶│              │     │              │
//! │ Blink       │────▶│  EventQueue  │────▶│  Fsm         │
//! │ Buttons     │────▶│  (bounded)   │     │  dispatch()  │
//! │ Encoder     │────▶│              │     │              │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use heapless::Deque;
use log::warn;

use crate::scheduler::IntervalEvent;

/// Maximum number of events gathered in one loop iteration.
/// Two countdown events, one blink, three buttons, one rotation.
const EVENT_QUEUE_CAP: usize = 8;

/// Everything the state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // ── User input ────────────────────────────────────────
    /// Encoder push switch pressed.
    Confirm,
    /// Start button pressed.
    Start,
    /// Stop button pressed (pause, cancel, or secret count in Idle).
    Stop,
    /// Encoder turned by this many detents; positive lengthens.
    Rotate(i16),

    // ── Countdown ─────────────────────────────────────────
    /// One countdown period elapsed; `elapsed` is the running count.
    Tick { elapsed: u32 },
    /// The countdown reached its target count.
    NaturalStop { elapsed: u32 },

    // ── Display ───────────────────────────────────────────
    /// The edit-mode blink period elapsed.
    BlinkTick,
}

impl From<IntervalEvent> for Event {
    fn from(ev: IntervalEvent) -> Self {
        match ev {
            IntervalEvent::Tick { elapsed } => Self::Tick { elapsed },
            IntervalEvent::NaturalStop { elapsed } => Self::NaturalStop { elapsed },
        }
    }
}

/// Bounded FIFO of pending events.
pub struct EventQueue {
    pending: Deque<Event, EVENT_QUEUE_CAP>,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            pending: Deque::new(),
        }
    }

    /// Queue an event.  Returns `false` if the queue is full (event dropped).
    pub fn push(&mut self, event: Event) -> bool {
        match self.pending.push_back(event) {
            Ok(()) => true,
            Err(dropped) => {
                warn!("event queue full, dropping {:?}", dropped);
                false
            }
        }
    }

    /// Next event in FIFO order.
    pub fn pop(&mut self) -> Option<Event> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}
