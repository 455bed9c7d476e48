//! GPIO / peripheral pin assignments for the enlarger timer board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  `main.rs` takes the matching `gpioN` fields from
//! the HAL peripherals.

// ---------------------------------------------------------------------------
// Rotary encoder (mechanical, 4 transitions per detent)
// ---------------------------------------------------------------------------

/// Encoder CLK (A) line.  Any-edge interrupt.
pub const ENCODER_CLK_GPIO: i32 = 5;
/// Encoder DT (B) line.  Any-edge interrupt.
pub const ENCODER_DT_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Buttons (active-low, internal pull-up)
// ---------------------------------------------------------------------------

/// Encoder shaft push switch: confirm.
pub const CONFIRM_BUTTON_GPIO: i32 = 4;
/// Start exposure.
pub const START_BUTTON_GPIO: i32 = 7;
/// Stop / pause / cancel.
pub const STOP_BUTTON_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// TM1637 4-digit display (two-wire, open-drain DIO)
// ---------------------------------------------------------------------------

pub const DISPLAY_DIO_GPIO: i32 = 9;
pub const DISPLAY_CLK_GPIO: i32 = 10;

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

/// Piezo buzzer, driven with a bit-banged square wave.
pub const BUZZER_GPIO: i32 = 11;
/// Digital output: HIGH = UV source relay energised.
pub const UV_RELAY_GPIO: i32 = 2;
