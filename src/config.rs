//! Timer configuration parameters
//!
//! All tunable constants of the enlarger timer.  There is no persistence:
//! the device always boots with [`TimerConfig::default()`].

use heapless::String;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Capacity of the secret scrolling message.
pub const SECRET_MESSAGE_CAP: usize = 48;

const DEFAULT_SECRET_MESSAGE: &str = "SinAn SAkic - nE trAzi je sine";

/// Core timer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    // --- Exposure editing ---
    /// Seconds added or removed per encoder detent
    pub step_secs: u32,

    // --- Timing ---
    /// Countdown cadence (milliseconds per elapsed second)
    pub countdown_period_ms: u32,
    /// Edit-mode blink cadence (milliseconds per toggle)
    pub blink_period_ms: u32,
    /// Minimum stable time before a button level change counts
    pub debounce_ms: u32,

    // --- Display ---
    /// Display backlight (0-100%)
    pub backlight_percent: u8,
    /// Snake animation cycles played at power-on
    pub boot_snake_cycles: u8,
    /// Snake animation cycles played on every return to Idle
    pub idle_snake_cycles: u8,
    /// Delay between frames of scrolling text (milliseconds)
    pub scroll_frame_ms: u32,

    // --- Secret sequence ---
    /// Consecutive stop presses in Idle that trigger the secret sequence
    pub secret_press_count: u8,
    /// Message scrolled across the display
    pub secret_message: String<SECRET_MESSAGE_CAP>,
    /// How many times the message scrolls
    pub secret_scroll_repeats: u8,
    /// Minutes and seconds shown after the message
    pub secret_time: (u8, u8),
}

impl Default for TimerConfig {
    fn default() -> Self {
        let mut secret_message = String::new();
        // Fits: covered by `default_secret_message_fits`.
        let _ = secret_message.push_str(DEFAULT_SECRET_MESSAGE);

        Self {
            // Exposure editing
            step_secs: 5,

            // Timing
            countdown_period_ms: 1000, // 1 Hz
            blink_period_ms: 100,      // 10 Hz
            debounce_ms: 10,

            // Display
            backlight_percent: 100,
            boot_snake_cycles: 3,
            idle_snake_cycles: 1,
            scroll_frame_ms: 250,

            // Secret sequence
            secret_press_count: 5,
            secret_message,
            secret_scroll_repeats: 1,
            secret_time: (66, 66),
        }
    }
}

impl TimerConfig {
    /// Reject values the controller cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.step_secs == 0 {
            return Err(Error::Config("step_secs must be non-zero"));
        }
        if self.countdown_period_ms == 0 {
            return Err(Error::Config("countdown_period_ms must be non-zero"));
        }
        if self.blink_period_ms == 0 {
            return Err(Error::Config("blink_period_ms must be non-zero"));
        }
        if self.secret_press_count == 0 {
            return Err(Error::Config("secret_press_count must be non-zero"));
        }
        if self.backlight_percent > 100 {
            return Err(Error::Config("backlight_percent must be 0-100"));
        }
        Ok(())
    }

    /// JSON rendering for the boot banner on the serial log.
    pub fn to_json(&self) -> serde_json::Result<std::string::String> {
        serde_json::to_string(self)
    }
}
