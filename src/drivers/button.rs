//! Debounced push-button driver with single-press edge detection.
//!
//! ## Hardware
//!
//! Active-low momentary switch with pull-up.  The main loop calls
//! [`DebouncedButton::poll`] every iteration; a level change only counts
//! once it has been stable for the debounce window.
//!
//! ## Contract
//!
//! | Call         | Returns `true` when                                 |
//! |--------------|-----------------------------------------------------|
//! | `poll()`     | the stable level just went from released to pressed |
//!
//! At most once per physical press.  Holding the button does not repeat.

use embedded_hal::digital::InputPin;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Released,
    /// Raw level reads pressed; waiting for it to hold.
    PressPending { since_ms: u32 },
    Pressed,
    /// Raw level reads released; waiting for it to hold.
    ReleasePending { since_ms: u32 },
}

pub struct DebouncedButton<P> {
    pin: P,
    debounce_ms: u32,
    state: DebounceState,
}

impl<P: InputPin> DebouncedButton<P> {
    pub fn new(pin: P, debounce_ms: u32) -> Self {
        Self {
            pin,
            debounce_ms,
            state: DebounceState::Released,
        }
    }

    /// Sample the pin.  Returns `true` exactly once per debounced press.
    pub fn poll(&mut self, now_ms: u32) -> bool {
        let down = self.is_down();

        match self.state {
            DebounceState::Released => {
                if down {
                    self.state = DebounceState::PressPending { since_ms: now_ms };
                    return self.settle_press(now_ms);
                }
                false
            }

            DebounceState::PressPending { .. } => {
                if !down {
                    self.state = DebounceState::Released;
                    return false;
                }
                self.settle_press(now_ms)
            }

            DebounceState::Pressed => {
                if !down {
                    self.state = DebounceState::ReleasePending { since_ms: now_ms };
                    self.settle_release(now_ms);
                }
                false
            }

            DebounceState::ReleasePending { .. } => {
                if down {
                    self.state = DebounceState::Pressed;
                } else {
                    self.settle_release(now_ms);
                }
                false
            }
        }
    }

    /// Debounced level: `true` while held.
    pub fn is_pressed(&self) -> bool {
        matches!(
            self.state,
            DebounceState::Pressed | DebounceState::ReleasePending { .. }
        )
    }

    fn settle_press(&mut self, now_ms: u32) -> bool {
        if let DebounceState::PressPending { since_ms } = self.state {
            if now_ms.wrapping_sub(since_ms) >= self.debounce_ms {
                self.state = DebounceState::Pressed;
                return true;
            }
        }
        false
    }

    fn settle_release(&mut self, now_ms: u32) {
        if let DebounceState::ReleasePending { since_ms } = self.state {
            if now_ms.wrapping_sub(since_ms) >= self.debounce_ms {
                self.state = DebounceState::Released;
            }
        }
    }

    fn is_down(&mut self) -> bool {
        match self.pin.is_low() {
            Ok(low) => low,
            Err(_) => {
                warn!("button: pin read failed, treating as released");
                false
            }
        }
    }
}
