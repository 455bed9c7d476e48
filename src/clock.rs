//! Seconds → minutes:seconds for the 4-digit display.
//!
//! Hours are not tracked.  Anything at or above 3600 s shows its minutes
//! modulo 60, so 3605 s reads `00:05`.  Exposures on the enlarger are far
//! below an hour.

/// Minutes component shown on the display.
pub const fn minutes(total_secs: u32) -> u8 {
    ((total_secs % 3600) / 60) as u8
}

/// Seconds component shown on the display.
pub const fn seconds(total_secs: u32) -> u8 {
    (total_secs % 60) as u8
}

/// A display-ready `MM:SS` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinSec {
    pub minutes: u8,
    pub seconds: u8,
}

impl MinSec {
    pub const ZERO: Self = Self {
        minutes: 0,
        seconds: 0,
    };

    pub const fn from_secs(total_secs: u32) -> Self {
        Self {
            minutes: minutes(total_secs),
            seconds: seconds(total_secs),
        }
    }
}

impl core::fmt::Display for MinSec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}
