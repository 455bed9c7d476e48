//! Periodic interval counter.
//!
//! Drives both the exposure countdown (bounded by a target count) and the
//! edit-mode blink (unbounded).  The counter is polled: the main loop calls
//! [`IntervalCounter::update`] every iteration with the current monotonic
//! time, and it returns the tagged events that became due.  There are no
//! callbacks.
//!
//! ```text
//!            start / start_for_count
//!  Stopped ─────────────────────────────▶ Running ──[count == target]──▶ Stopped
//!     ▲                                   │    ▲            (NaturalStop)
//!     │              pause                │    │ resume
//!     └────────────── stop ─────────── Paused ─┘
//! ```
//!
//! Pausing keeps both the count and the part of the current period that had
//! not yet elapsed, so a pause/resume cycle neither loses nor adds time.

use heapless::Vec;
use log::debug;

/// Events produced by one [`IntervalCounter::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalEvent {
    /// A period elapsed.  `elapsed` counts periods since start.
    Tick { elapsed: u32 },
    /// The target count was reached; the counter has stopped itself.
    NaturalStop { elapsed: u32 },
}

/// At most one tick plus its natural stop per update.
pub type Fired = Vec<IntervalEvent, 2>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Stopped,
    Running { next_due_ms: u32 },
    Paused { remaining_ms: u32 },
}

/// A restartable, pausable periodic counter.
#[derive(Debug)]
pub struct IntervalCounter {
    period_ms: u32,
    /// Stop after this many periods (`None` = run until stopped).
    target: Option<u32>,
    count: u32,
    state: RunState,
    /// Set when started with a zero target; reported on the next update.
    stop_pending: bool,
}

impl IntervalCounter {
    pub const fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            target: None,
            count: 0,
            state: RunState::Stopped,
            stop_pending: false,
        }
    }

    /// Run indefinitely from `now_ms`.
    pub fn start(&mut self, now_ms: u32) {
        self.begin(None, now_ms);
    }

    /// Run for `target` periods, then stop with [`IntervalEvent::NaturalStop`].
    pub fn start_for_count(&mut self, target: u32, now_ms: u32) {
        self.begin(Some(target), now_ms);
        if target == 0 {
            self.state = RunState::Stopped;
            self.stop_pending = true;
        }
    }

    /// Suspend without resetting the count.
    pub fn pause(&mut self, now_ms: u32) {
        if let RunState::Running { next_due_ms } = self.state {
            let remaining_ms = if is_due(now_ms, next_due_ms) {
                0
            } else {
                next_due_ms.wrapping_sub(now_ms)
            };
            self.state = RunState::Paused { remaining_ms };
            debug!("interval: paused at count {} ({}ms left in period)", self.count, remaining_ms);
        }
    }

    /// Continue a paused counter from where it left off.
    pub fn resume(&mut self, now_ms: u32) {
        if let RunState::Paused { remaining_ms } = self.state {
            self.state = RunState::Running {
                next_due_ms: now_ms.wrapping_add(remaining_ms),
            };
            debug!("interval: resumed at count {}", self.count);
        }
    }

    /// Stop and forget progress.  No events fire until restarted.
    pub fn stop(&mut self) {
        self.state = RunState::Stopped;
        self.stop_pending = false;
    }

    /// Evaluate elapsed time.  Call once per loop iteration.
    ///
    /// At most one period is consumed per call; a late caller catches up
    /// over the following iterations.
    pub fn update(&mut self, now_ms: u32) -> Fired {
        let mut fired = Fired::new();

        if self.stop_pending {
            self.stop_pending = false;
            let _ = fired.push(IntervalEvent::NaturalStop {
                elapsed: self.count,
            });
            return fired;
        }

        let RunState::Running { next_due_ms } = self.state else {
            return fired;
        };
        if !is_due(now_ms, next_due_ms) {
            return fired;
        }

        self.count += 1;
        self.state = RunState::Running {
            next_due_ms: next_due_ms.wrapping_add(self.period_ms),
        };
        let _ = fired.push(IntervalEvent::Tick {
            elapsed: self.count,
        });

        if self.target == Some(self.count) {
            self.state = RunState::Stopped;
            let _ = fired.push(IntervalEvent::NaturalStop {
                elapsed: self.count,
            });
        }

        fired
    }

    /// Periods elapsed since the last start.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RunState::Running { .. })
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, RunState::Paused { .. })
    }

    fn begin(&mut self, target: Option<u32>, now_ms: u32) {
        self.target = target;
        self.count = 0;
        self.stop_pending = false;
        self.state = RunState::Running {
            next_due_ms: now_ms.wrapping_add(self.period_ms),
        };
    }
}

/// `now` has reached `due` on a wrapping millisecond clock.
fn is_due(now_ms: u32, due_ms: u32) -> bool {
    (now_ms.wrapping_sub(due_ms) as i32) >= 0
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
