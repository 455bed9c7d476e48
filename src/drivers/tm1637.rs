//! TM1637 LED driver over a bit-banged two-wire bus.
//!
//! ## Bus
//!
//! Not I2C despite the look: no device address, bytes go LSB first, and the
//! chip pulls DIO low for one clock after each byte as an acknowledge.
//!
//! ```text
//!  start:  DIO ‾‾\____      (CLK high)
//!  bit:    CLK __/‾‾\__     (DIO set while CLK low, sampled on rise)
//!  stop:   DIO __/‾‾‾‾      (CLK high)
//! ```
//!
//! DIO must be an open-drain pin that can also be read back (for the ack).
//!
//! ## Commands
//!
//! | Byte          | Meaning                                  |
//! |---------------|------------------------------------------|
//! | `0x40`        | data write, auto-increment address       |
//! | `0xC0`        | address of digit 0 (data follows)        |
//! | `0x88 \| n`   | display on, brightness `n` in 0..=7      |
//! | `0x80`        | display off                              |

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::{Error, Result};

pub const DIGITS: usize = 4;

const CMD_DATA_AUTO_INCREMENT: u8 = 0x40;
const CMD_ADDRESS_DIGIT0: u8 = 0xC0;
const CMD_DISPLAY_ON: u8 = 0x88;
const CMD_DISPLAY_OFF: u8 = 0x80;

/// Brightest level the chip supports.
pub const MAX_BRIGHTNESS: u8 = 7;

/// Half-period of the bus clock.
const BIT_DELAY_US: u32 = 5;

/// Backlight percentage → chip brightness level (`None` = display off).
pub fn brightness_level(percent: u8) -> Option<u8> {
    if percent == 0 {
        return None;
    }
    let level = (u16::from(percent.min(100)) * u16::from(MAX_BRIGHTNESS) / 100) as u8;
    Some(level)
}

pub struct Tm1637<CLK, DIO, D> {
    clk: CLK,
    dio: DIO,
    delay: D,
    control: u8,
}

impl<CLK, DIO, D> Tm1637<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: OutputPin + InputPin,
    D: DelayNs,
{
    /// Wrap the bus pins.  Nothing is sent until the first write.
    pub fn new(clk: CLK, dio: DIO, delay: D) -> Self {
        Self {
            clk,
            dio,
            delay,
            control: CMD_DISPLAY_ON | MAX_BRIGHTNESS,
        }
    }

    /// Write all four digits' segment bytes (bit 7 = colon on digit 1).
    pub fn write_segments(&mut self, segments: &[u8; DIGITS]) -> Result<()> {
        self.command(CMD_DATA_AUTO_INCREMENT)?;

        self.start()?;
        self.write_byte(CMD_ADDRESS_DIGIT0)?;
        for &seg in segments {
            self.write_byte(seg)?;
        }
        self.stop()?;

        self.command(self.control)
    }

    /// Set brightness from a 0–100 % backlight level.  0 turns the display off.
    pub fn set_backlight(&mut self, percent: u8) -> Result<()> {
        self.control = match brightness_level(percent) {
            Some(level) => CMD_DISPLAY_ON | level,
            None => CMD_DISPLAY_OFF,
        };
        self.command(self.control)
    }

    /// Raw delay access for callers pacing animations on the same timer.
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    // ── Bus primitives ────────────────────────────────────────

    fn command(&mut self, cmd: u8) -> Result<()> {
        self.start()?;
        self.write_byte(cmd)?;
        self.stop()
    }

    fn start(&mut self) -> Result<()> {
        self.dio_high()?;
        self.clk_high()?;
        self.bit_delay();
        self.dio_low()?;
        self.bit_delay();
        self.clk_low()
    }

    fn stop(&mut self) -> Result<()> {
        self.clk_low()?;
        self.dio_low()?;
        self.bit_delay();
        self.clk_high()?;
        self.bit_delay();
        self.dio_high()?;
        self.bit_delay();
        Ok(())
    }

    fn write_byte(&mut self, byte: u8) -> Result<()> {
        for bit in 0..8 {
            self.clk_low()?;
            if byte & (1 << bit) != 0 {
                self.dio_high()?;
            } else {
                self.dio_low()?;
            }
            self.bit_delay();
            self.clk_high()?;
            self.bit_delay();
        }

        // Ack clock: release DIO and let the chip pull it low.
        self.clk_low()?;
        self.dio_high()?;
        self.bit_delay();
        self.clk_high()?;
        self.bit_delay();
        let acked = self.dio.is_low().map_err(|_| Error::Pin)?;
        self.clk_low()?;

        if acked { Ok(()) } else { Err(Error::Nack) }
    }

    fn bit_delay(&mut self) {
        self.delay.delay_us(BIT_DELAY_US);
    }

    fn clk_high(&mut self) -> Result<()> {
        self.clk.set_high().map_err(|_| Error::Pin)
    }

    fn clk_low(&mut self) -> Result<()> {
        self.clk.set_low().map_err(|_| Error::Pin)
    }

    fn dio_high(&mut self) -> Result<()> {
        self.dio.set_high().map_err(|_| Error::Pin)
    }

    fn dio_low(&mut self) -> Result<()> {
        self.dio.set_low().map_err(|_| Error::Pin)
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
