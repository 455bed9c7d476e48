//! Shared mutable context threaded through every FSM handler.
//!
//! `TimerContext` is the single struct that state handlers read from and
//! write to: the exposure duration, the edit-mode blink flag, the secret
//! press counter, the relay level, and the side effects the handlers
//! request.  Handlers never touch hardware or the countdown directly; they
//! queue [`Effect`]s and a [`CountdownCommand`] which the timer service
//! applies after each dispatch.

use heapless::{String, Vec};
use log::warn;

use super::Mode;
use crate::clock::MinSec;
use crate::config::{SECRET_MESSAGE_CAP, TimerConfig};

/// Effects one dispatch may queue.  The secret sequence is the longest.
const EFFECT_CAP: usize = 16;

// ---------------------------------------------------------------------------
// Display and countdown requests (written by handlers; applied by service)
// ---------------------------------------------------------------------------

/// One call on the display renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayCommand {
    /// Show `MM:SS`.
    Time { minutes: u8, seconds: u8, colon: bool },
    /// Blank all digits.
    Clear,
    /// Scroll text across the digits `repeats` times (blocking).
    ScrollText(String<SECRET_MESSAGE_CAP>, u8),
    /// Drop any pending scroll state and blank the buffer.
    Flush,
    /// Decorative snake animation for this many laps (blocking).
    Snake(u8),
    /// Backlight level in percent.
    Backlight(u8),
}

impl DisplayCommand {
    /// `MM:SS` with the colon lit.
    pub fn time(secs: u32) -> Self {
        let MinSec { minutes, seconds } = MinSec::from_secs(secs);
        Self::Time {
            minutes,
            seconds,
            colon: true,
        }
    }
}

/// Side effects requested by a handler, applied in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Display(DisplayCommand),
    /// Play the audio cue on the buzzer (blocking).
    Cue,
}

/// What the countdown counter should do after this dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownCommand {
    /// Fresh countdown of `count` periods.
    Start { count: u32 },
    Pause,
    Resume,
    Stop,
}

// ---------------------------------------------------------------------------
// TimerContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct TimerContext {
    // -- Exposure --
    /// Configured exposure length in whole seconds.  Written only by the
    /// encoder in `Editable` and by the Idle / completion resets.
    pub(crate) exposure_secs: u32,

    // -- Display --
    /// Edit-mode blink phase.  Forced back to `true` on leaving `Editable`.
    pub blink_visible: bool,

    // -- Secret sequence --
    /// Stop presses counted in `Idle`; reset only on reaching the threshold.
    pub secret_presses: u8,

    // -- Outputs --
    /// UV relay level.  Recomputed by the engine on every transition.
    pub relay_on: bool,
    /// Mode the last transition came from.
    pub previous: Mode,

    // -- Pending side effects --
    pub effects: Vec<Effect, EFFECT_CAP>,
    pub countdown: Option<CountdownCommand>,

    // -- Configuration --
    pub config: TimerConfig,
}

impl TimerContext {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            exposure_secs: 0,
            blink_visible: true,
            secret_presses: 0,
            relay_on: false,
            previous: Mode::Setup,
            effects: Vec::new(),
            countdown: None,
            config,
        }
    }

    pub fn exposure_secs(&self) -> u32 {
        self.exposure_secs
    }

    /// Queue a display call.
    pub fn display(&mut self, cmd: DisplayCommand) {
        self.effect(Effect::Display(cmd));
    }

    /// Queue a render of the current exposure duration.
    pub fn show_exposure(&mut self) {
        self.display(DisplayCommand::time(self.exposure_secs));
    }

    pub fn effect(&mut self, effect: Effect) {
        if let Err(dropped) = self.effects.push(effect) {
            warn!("effect queue full, dropping {:?}", dropped);
        }
    }

    /// Take the queued effects, leaving the queue empty.
    pub fn take_effects(&mut self) -> Vec<Effect, EFFECT_CAP> {
        core::mem::take(&mut self.effects)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_context_is_quiet() {
        let ctx = TimerContext::new(TimerConfig::default());
        assert_eq!(ctx.exposure_secs(), 0);
        assert!(ctx.blink_visible);
        assert!(!ctx.relay_on);
        assert!(ctx.effects.is_empty());
        assert_eq!(ctx.countdown, None);
    }

    #[test]
    fn show_exposure_renders_minutes_and_seconds() {
        let mut ctx = TimerContext::new(TimerConfig::default());
        ctx.exposure_secs = 95;
        ctx.show_exposure();
        assert_eq!(
            ctx.take_effects().as_slice(),
            &[Effect::Display(DisplayCommand::Time {
                minutes: 1,
                seconds: 35,
                colon: true
            })]
        );
        assert!(ctx.effects.is_empty());
    }

    #[test]
    fn overflowing_effects_are_dropped() {
        let mut ctx = TimerContext::new(TimerConfig::default());
        for _ in 0..EFFECT_CAP + 3 {
            ctx.effect(Effect::Cue);
        }
        assert_eq!(ctx.effects.len(), EFFECT_CAP);
    }
}
