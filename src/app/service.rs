//! Application service — the hexagonal core.
//!
//! [`TimerService`] owns the FSM, its context, the countdown and blink
//! counters, and the encoder tracker.  It exposes a hardware-agnostic API;
//! all I/O flows through port traits injected at call sites, so the whole
//! controller is testable with mock adapters.
//!
//! ```text
//!   InputPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │         TimerService         │
//! DisplayPort ◀── │  FSM · countdown · blink     │
//!  OutputPort ◀── │  EventQueue · EncoderTracker │
//!                 └──────────────────────────────┘
//! ```
//!
//! One [`TimerService::poll`] per main-loop iteration:
//!
//! 1. update the countdown and blink counters, queueing their events
//! 2. evaluate the current mode's per-iteration handler (`Setup`, `Secret`)
//! 3. sample buttons and encoder, queueing presses and detent steps
//! 4. drain the queue through the FSM, applying side effects after each event

use log::{debug, info};

use crate::config::TimerConfig;
use crate::events::{Event, EventQueue};
use crate::fsm::context::{CountdownCommand, DisplayCommand, Effect, TimerContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, Mode};
use crate::scheduler::IntervalCounter;

use super::events::AppEvent;
use super::input::EncoderTracker;
use super::ports::{DisplayPort, EventSink, InputPort, OutputPort};

// ───────────────────────────────────────────────────────────────
// TimerService
// ───────────────────────────────────────────────────────────────

/// The exposure controller.
pub struct TimerService {
    fsm: Fsm,
    ctx: TimerContext,
    /// Exposure countdown; only ever running while the mode is `Running`.
    countdown: IntervalCounter,
    /// Edit-mode blink cadence; runs continuously.
    blink: IntervalCounter,
    encoder: EncoderTracker,
    queue: EventQueue,
    /// Timestamp of the poll in progress.
    now_ms: u32,
}

impl TimerService {
    /// Construct the service from configuration.
    ///
    /// Does **not** start the FSM — call [`Self::start`] next.
    pub fn new(config: TimerConfig) -> Self {
        let countdown = IntervalCounter::new(config.countdown_period_ms);
        let blink = IntervalCounter::new(config.blink_period_ms);

        Self {
            fsm: Fsm::new(build_state_table(), Mode::Setup),
            ctx: TimerContext::new(config),
            countdown,
            blink,
            encoder: EncoderTracker::new(),
            queue: EventQueue::new(),
            now_ms: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Boot display sequence, relay off, blink cadence running, FSM in
    /// `Setup`.  The first [`Self::poll`] moves it to `Idle`.
    pub fn start(
        &mut self,
        now_ms: u32,
        hw: &mut (impl DisplayPort + OutputPort),
        sink: &mut impl EventSink,
    ) {
        self.now_ms = now_ms;

        hw.set_uv(false);
        let boot = [
            DisplayCommand::Clear,
            DisplayCommand::Backlight(self.ctx.config.backlight_percent),
            DisplayCommand::Snake(self.ctx.config.boot_snake_cycles),
            DisplayCommand::time(0),
        ];
        for cmd in &boot {
            render(hw, cmd);
        }

        self.blink.start(now_ms);
        self.fsm.start(&mut self.ctx);
        self.apply(hw);

        sink.emit(&AppEvent::Started(self.fsm.current_mode()));
        info!("TimerService started in {}", self.fsm.current_mode());
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one loop iteration.
    ///
    /// The `hw` parameter satisfies all three hardware ports, which avoids
    /// a double mutable borrow while keeping the port boundary explicit.
    pub fn poll(
        &mut self,
        now_ms: u32,
        hw: &mut (impl InputPort + DisplayPort + OutputPort),
        sink: &mut impl EventSink,
    ) {
        self.now_ms = now_ms;

        // 1. Counters
        // The countdown only runs in Running: `running_enter` starts or
        // resumes it, `paused_enter` pauses it, and `idle_enter` and
        // `editable_enter` stop it.
        for fired in self.countdown.update(now_ms) {
            debug_assert_eq!(
                self.fsm.current_mode(),
                Mode::Running,
                "countdown fired outside Running"
            );
            self.queue.push(fired.into());
        }
        if !self.blink.update(now_ms).is_empty() {
            self.queue.push(Event::BlinkTick);
        }

        // 2. Per-iteration handler
        if let Some((from, to)) = self.fsm.tick(&mut self.ctx) {
            self.emit_transition(from, to, sink);
            self.apply(hw);
        }

        // 3. Inputs
        let input = hw.read_inputs(now_ms);
        if input.confirm {
            self.queue.push(Event::Confirm);
        }
        if input.start {
            self.queue.push(Event::Start);
        }
        if input.stop {
            self.queue.push(Event::Stop);
        }
        if let Some(steps) = self.encoder.steps(input.encoder) {
            self.queue.push(Event::Rotate(steps));
        }

        // 4. Drain
        while let Some(event) = self.queue.pop() {
            self.handle_event(event, hw, sink);
        }
    }

    /// Deliver one event to the FSM and apply its side effects.
    pub fn handle_event(
        &mut self,
        event: Event,
        hw: &mut (impl DisplayPort + OutputPort),
        sink: &mut impl EventSink,
    ) {
        let mode_before = self.fsm.current_mode();
        let exposure_before = self.ctx.exposure_secs();

        let transition = self.fsm.dispatch(event, &mut self.ctx);

        match event {
            Event::Tick { elapsed } if mode_before == Mode::Running => {
                sink.emit(&AppEvent::CountdownTick {
                    remaining_secs: exposure_before.saturating_sub(elapsed),
                });
            }
            Event::NaturalStop { .. } if mode_before == Mode::Running => {
                sink.emit(&AppEvent::ExposureComplete);
            }
            Event::Rotate(_) if mode_before == Mode::Editable => {
                if self.ctx.exposure_secs() != exposure_before {
                    sink.emit(&AppEvent::ExposureAdjusted {
                        secs: self.ctx.exposure_secs(),
                    });
                }
            }
            _ => {}
        }

        if let Some((from, to)) = transition {
            self.emit_transition(from, to, sink);
        }
        self.apply(hw);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.fsm.current_mode()
    }

    /// Configured exposure in seconds.
    pub fn exposure_secs(&self) -> u32 {
        self.ctx.exposure_secs()
    }

    /// Edit-mode blink phase.
    pub fn blink_visible(&self) -> bool {
        self.ctx.blink_visible
    }

    /// Stop presses counted towards the secret sequence.
    pub fn secret_presses(&self) -> u8 {
        self.ctx.secret_presses
    }

    /// Relay level the controller is asserting.
    pub fn relay_on(&self) -> bool {
        self.ctx.relay_on
    }

    /// Countdown periods elapsed since the current exposure started.
    pub fn countdown_elapsed(&self) -> u32 {
        self.countdown.count()
    }

    pub fn is_countdown_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn is_countdown_paused(&self) -> bool {
        self.countdown.is_paused()
    }

    /// The live configuration.
    pub fn config(&self) -> &TimerConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit_transition(&self, from: Mode, to: Mode, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::ModeChanged { from, to });
        if to == Mode::Secret {
            sink.emit(&AppEvent::SecretTriggered);
        }
    }

    /// Push the context's pending requests out to the counters and ports.
    /// The relay goes first so it never waits behind a blocking animation.
    fn apply(&mut self, hw: &mut (impl DisplayPort + OutputPort)) {
        if hw.is_uv_on() != self.ctx.relay_on {
            hw.set_uv(self.ctx.relay_on);
        }

        if let Some(cmd) = self.ctx.countdown.take() {
            debug!("countdown: {:?}", cmd);
            match cmd {
                CountdownCommand::Start { count } => {
                    self.countdown.start_for_count(count, self.now_ms);
                }
                CountdownCommand::Pause => self.countdown.pause(self.now_ms),
                CountdownCommand::Resume => self.countdown.resume(self.now_ms),
                CountdownCommand::Stop => self.countdown.stop(),
            }
        }

        for effect in self.ctx.take_effects() {
            match effect {
                Effect::Display(cmd) => render(hw, &cmd),
                Effect::Cue => hw.play_cue(),
            }
        }
    }
}

/// Translate one display request into a port call.
fn render(hw: &mut impl DisplayPort, cmd: &DisplayCommand) {
    match cmd {
        DisplayCommand::Time {
            minutes,
            seconds,
            colon,
        } => hw.print_time(*minutes, *seconds, *colon),
        DisplayCommand::Clear => hw.clear(),
        DisplayCommand::ScrollText(text, repeats) => hw.scrolling_text(text.as_str(), *repeats),
        DisplayCommand::Flush => hw.flush(),
        DisplayCommand::Snake(cycles) => hw.snake(*cycles),
        DisplayCommand::Backlight(percent) => hw.set_backlight(*percent),
    }
}
