//! Unified error type for the hardware boundary.
//!
//! The exposure logic itself never fails: out-of-range edits are clamped and
//! stray inputs are ignored.  Errors only exist where the firmware talks to
//! pins and peripherals, and the hardware adapter logs them instead of
//! passing them inward.  All variants are `Copy`.

use core::fmt;

/// Every fallible driver or bring-up operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A GPIO read or write failed.
    Pin,
    /// The display controller did not acknowledge a byte.
    Nack,
    /// Configuration is invalid.
    Config(&'static str),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin => write!(f, "GPIO access failed"),
            Self::Nack => write!(f, "display did not acknowledge"),
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
