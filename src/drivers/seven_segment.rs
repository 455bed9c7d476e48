//! Four-digit seven-segment renderer on top of the TM1637 bus.
//!
//! Segment bits:
//!
//! ```text
//!      ─a─          a = 0x01   e = 0x10
//!     f   b         b = 0x02   f = 0x20
//!      ─g─          c = 0x04   g = 0x40
//!     e   c         d = 0x08   colon (digit 1 only) = 0x80
//!      ─d─
//! ```
//!
//! Text is best-effort: every letter maps to the closest readable glyph,
//! unknown characters render blank.  Scrolling and the snake animation
//! block for their whole duration.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use heapless::Vec;

use super::tm1637::{DIGITS, Tm1637};
use crate::error::Result;

pub type Frame = [u8; DIGITS];

pub const BLANK: Frame = [0; DIGITS];

const COLON: u8 = 0x80;

const SEG_A: u8 = 0x01;
const SEG_B: u8 = 0x02;
const SEG_C: u8 = 0x04;
const SEG_D: u8 = 0x08;
const SEG_E: u8 = 0x10;
const SEG_F: u8 = 0x20;

const DIGIT_GLYPHS: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Longest text (plus padding) a scroll can hold.
const SCROLL_CAP: usize = 64;

/// Frame interval of the snake animation.
const SNAKE_FRAME_MS: u32 = 40;

// ── Glyphs ────────────────────────────────────────────────────

pub fn glyph(c: char) -> u8 {
    match c {
        '0'..='9' => DIGIT_GLYPHS[(c as u8 - b'0') as usize],
        'A' => 0x77,
        'a' => 0x5F,
        'B' | 'b' => 0x7C,
        'C' => 0x39,
        'c' => 0x58,
        'D' | 'd' => 0x5E,
        'E' => 0x79,
        'e' => 0x7B,
        'F' | 'f' => 0x71,
        'G' => 0x3D,
        'g' => 0x6F,
        'H' => 0x76,
        'h' => 0x74,
        'I' => 0x06,
        'i' => 0x04,
        'J' | 'j' => 0x1E,
        'K' | 'k' => 0x75,
        'L' | 'l' => 0x38,
        'M' | 'm' => 0x37,
        'N' | 'n' => 0x54,
        'O' => 0x3F,
        'o' => 0x5C,
        'P' | 'p' => 0x73,
        'Q' | 'q' => 0x67,
        'R' | 'r' => 0x50,
        'S' | 's' => 0x6D,
        'T' | 't' => 0x78,
        'U' => 0x3E,
        'u' | 'V' | 'v' => 0x1C,
        'Y' | 'y' => 0x6E,
        'Z' | 'z' => 0x5B,
        '-' => 0x40,
        '_' => 0x08,
        _ => 0x00,
    }
}

/// `MM:SS`.  Each field shows its last two decimal digits.
pub fn time_frame(minutes: u8, seconds: u8, colon: bool) -> Frame {
    let digit = |v: u8| DIGIT_GLYPHS[(v % 10) as usize];
    [
        digit(minutes / 10),
        digit(minutes) | if colon { COLON } else { 0 },
        digit(seconds / 10),
        digit(seconds),
    ]
}

/// Successive windows of `text` scrolling in from the right and out to the
/// left.  Text beyond the buffer is cut off.
pub fn scroll_frames(text: &str) -> impl Iterator<Item = Frame> {
    let mut strip: Vec<u8, SCROLL_CAP> = Vec::new();
    let padding = core::iter::repeat_n(0u8, DIGITS);
    let body = text.chars().map(glyph).take(SCROLL_CAP - 2 * DIGITS);
    for g in padding.clone().chain(body).chain(padding) {
        // Capacity is reserved for both paddings above.
        let _ = strip.push(g);
    }

    let windows = strip.len() - (DIGITS - 1);
    (0..windows).map(move |i| {
        let mut frame = BLANK;
        frame.copy_from_slice(&strip[i..i + DIGITS]);
        frame
    })
}

/// One lap of a single lit segment around the outer edge of all digits.
pub fn snake_lap() -> impl Iterator<Item = Frame> {
    let top = (0..DIGITS).map(|d| (d, SEG_A));
    let right = [(DIGITS - 1, SEG_B), (DIGITS - 1, SEG_C)].into_iter();
    let bottom = (0..DIGITS).rev().map(|d| (d, SEG_D));
    let left = [(0, SEG_E), (0, SEG_F)].into_iter();

    top.chain(right).chain(bottom).chain(left).map(|(digit, seg)| {
        let mut frame = BLANK;
        frame[digit] = seg;
        frame
    })
}

// ── Renderer ──────────────────────────────────────────────────

/// The display the controller talks to.  Remembers the frame on the digits
/// so the snake can put it back when it finishes.
pub struct SegmentDisplay<CLK, DIO, D> {
    bus: Tm1637<CLK, DIO, D>,
    shown: Frame,
    scroll_frame_ms: u32,
}

impl<CLK, DIO, D> SegmentDisplay<CLK, DIO, D>
where
    CLK: OutputPin,
    DIO: OutputPin + InputPin,
    D: DelayNs,
{
    pub fn new(bus: Tm1637<CLK, DIO, D>, scroll_frame_ms: u32) -> Self {
        Self {
            bus,
            shown: BLANK,
            scroll_frame_ms,
        }
    }

    pub fn print_time(&mut self, minutes: u8, seconds: u8, colon: bool) -> Result<()> {
        self.show(time_frame(minutes, seconds, colon))
    }

    pub fn clear(&mut self) -> Result<()> {
        self.show(BLANK)
    }

    pub fn scrolling_text(&mut self, text: &str, repeats: u8) -> Result<()> {
        for _ in 0..repeats {
            for frame in scroll_frames(text) {
                self.show(frame)?;
                self.bus.delay_ms(self.scroll_frame_ms);
            }
        }
        Ok(())
    }

    /// Forget whatever is on the digits.
    pub fn flush(&mut self) -> Result<()> {
        self.clear()
    }

    /// Run the snake `cycles` times, then restore the previous frame.
    pub fn snake(&mut self, cycles: u8) -> Result<()> {
        let saved = self.shown;
        for _ in 0..cycles {
            for frame in snake_lap() {
                self.show(frame)?;
                self.bus.delay_ms(SNAKE_FRAME_MS);
            }
        }
        self.show(saved)
    }

    pub fn set_backlight(&mut self, percent: u8) -> Result<()> {
        self.bus.set_backlight(percent)
    }

    /// The frame currently on the digits.
    pub fn shown(&self) -> Frame {
        self.shown
    }

    fn show(&mut self, frame: Frame) -> Result<()> {
        self.bus.write_segments(&frame)?;
        self.shown = frame;
        Ok(())
    }
}
