//! Outbound application events.
//!
//! The [`TimerService`](super::service::TimerService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  On the device they end
//! up on the serial log; tests record them.

use crate::fsm::Mode;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service has started (carries the initial mode).
    Started(Mode),

    /// The FSM moved between modes.
    ModeChanged { from: Mode, to: Mode },

    /// The exposure duration was changed by the encoder.
    ExposureAdjusted { secs: u32 },

    /// One countdown period elapsed.
    CountdownTick { remaining_secs: u32 },

    /// The countdown reached zero on its own.
    ExposureComplete,

    /// The hidden press pattern was entered.
    SecretTriggered,
}
