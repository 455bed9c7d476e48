//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ TimerService (domain)
//! ```
//!
//! Driven adapters (buttons, encoder, display, relay, buzzer, event sinks)
//! implement these traits.  The [`TimerService`](super::service::TimerService)
//! consumes them via generics, so the domain core never touches hardware
//! directly.
//!
//! All methods are infallible from the domain's point of view: adapters log
//! driver errors and carry on, since the timer has no error surface to show.

use super::input::InputSnapshot;

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: polled once per loop iteration.
pub trait InputPort {
    /// Sample the buttons and the encoder.  Each button flag is `true` at
    /// most once per physical press.
    fn read_inputs(&mut self, now_ms: u32) -> InputSnapshot;
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → 4-digit display)
// ───────────────────────────────────────────────────────────────

/// The display renderer contract.
pub trait DisplayPort {
    /// Show `MM:SS`, optionally with the colon lit.
    fn print_time(&mut self, minutes: u8, seconds: u8, colon: bool);

    /// Blank all digits.
    fn clear(&mut self);

    /// Scroll `text` across the digits `repeats` times.  Blocks until done.
    fn scrolling_text(&mut self, text: &str, repeats: u8);

    /// Discard buffered content.
    fn flush(&mut self);

    /// Decorative snake animation.  Blocks until done.
    fn snake(&mut self, cycles: u8);

    /// Backlight level, 0–100 %.
    fn set_backlight(&mut self, percent: u8);
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → relay and buzzer)
// ───────────────────────────────────────────────────────────────

/// Digital outputs driven by the controller.
pub trait OutputPort {
    /// Energise or release the UV source relay.
    fn set_uv(&mut self, on: bool);

    /// Whether the relay line is currently driven high.
    fn is_uv_on(&self) -> bool;

    /// Play the audio cue.  Blocks until done.
    fn play_cue(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  On the device they go to the serial log.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
