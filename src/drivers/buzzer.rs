//! Piezo buzzer driven with a bit-banged square wave.
//!
//! Playback blocks the caller for the length of the tune.  It is only used
//! by the secret sequence, where no input needs servicing.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::error::{Error, Result};

/// One note: frequency in Hz (0 = rest) and length in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub freq_hz: u32,
    pub duration_ms: u32,
}

const fn note(freq_hz: u32, duration_ms: u32) -> Note {
    Note {
        freq_hz,
        duration_ms,
    }
}

/// Short rising arpeggio with a held top note.
pub const CUE: [Note; 6] = [
    note(523, 120), // C5
    note(659, 120), // E5
    note(784, 120), // G5
    note(0, 60),
    note(1047, 360), // C6
    note(0, 40),
];

pub struct Buzzer<P, D> {
    pin: P,
    delay: D,
}

impl<P: OutputPin, D: DelayNs> Buzzer<P, D> {
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Play every note in order, leaving the line low.
    pub fn play(&mut self, tune: &[Note]) -> Result<()> {
        let result = tune.iter().try_for_each(|n| self.tone(*n));
        self.pin.set_low().map_err(|_| Error::Pin)?;
        result
    }

    fn tone(&mut self, n: Note) -> Result<()> {
        if n.freq_hz == 0 {
            self.pin.set_low().map_err(|_| Error::Pin)?;
            self.delay.delay_ms(n.duration_ms);
            return Ok(());
        }

        let half_period_us = 500_000 / n.freq_hz;
        let cycles = n.duration_ms.saturating_mul(n.freq_hz) / 1000;
        for _ in 0..cycles {
            self.pin.set_high().map_err(|_| Error::Pin)?;
            self.delay.delay_us(half_period_us);
            self.pin.set_low().map_err(|_| Error::Pin)?;
            self.delay.delay_us(half_period_us);
        }
        Ok(())
    }
}
