//! Interrupt-driven quadrature decoder for a mechanical rotary encoder.
//!
//! ## Concurrency
//!
//! Both encoder lines fire an any-edge GPIO interrupt whose handler calls
//! [`QuadratureDecoder::tick`] with the two line levels.  That is the only
//! writer.  The handler touches nothing but the decoder's own atomics: no
//! mode, no duration, no queues.
//!
//! The main loop calls [`QuadratureDecoder::snapshot`], which is a single
//! 32-bit atomic load of the packed `(position, direction)` pair, so it can
//! never observe a half-updated reading.
//!
//! ```text
//!   GPIO ISR ──tick(a, b)──▶ [ raw_state | counts ] ──publish──▶ AtomicU32
//!                                                                  │
//!   main loop ◀────────────────── snapshot() (one load) ───────────┘
//! ```
//!
//! ## Decoding
//!
//! Four-step latch mode: every valid Gray-code transition moves an internal
//! count by ±1, and the detent position (`counts >> 2`) is published only
//! when both lines are high, which is the resting state of a detent.

use core::sync::atomic::{AtomicI32, AtomicU8, AtomicU32, Ordering};

/// Count delta indexed by `(old_state << 2) | new_state`, where a state is
/// `a | (b << 1)`.  Invalid (double) transitions contribute 0.
const TRANSITION_DELTA: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

/// Both lines high.
const LATCH_STATE: u8 = 0b11;

/// Direction of the last detent change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum Direction {
    Backward = -1,
    Stationary = 0,
    Forward = 1,
}

impl Direction {
    fn from_raw(raw: i8) -> Self {
        match raw.signum() {
            -1 => Self::Backward,
            1 => Self::Forward,
            _ => Self::Stationary,
        }
    }
}

/// A consistent reading of the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderSnapshot {
    /// Detent position; wraps at the `i16` range.
    pub position: i16,
    /// Direction of the most recent position change.
    pub direction: Direction,
}

impl EncoderSnapshot {
    pub const REST: Self = Self {
        position: 0,
        direction: Direction::Stationary,
    };

    fn pack(self) -> u32 {
        (self.position as u16 as u32) | ((self.direction as i8 as u8 as u32) << 16)
    }

    fn unpack(raw: u32) -> Self {
        Self {
            position: raw as u16 as i16,
            direction: Direction::from_raw((raw >> 16) as u8 as i8),
        }
    }
}

/// Quadrature decoder shared between the encoder ISR and the main loop.
///
/// `const`-constructible so it can live in a `static`.
pub struct QuadratureDecoder {
    /// Last observed line state (`a | b << 1`).  ISR-only.
    raw_state: AtomicU8,
    /// Transition count (4 per detent).  ISR-only.
    counts: AtomicI32,
    /// Packed [`EncoderSnapshot`], published by the ISR.
    published: AtomicU32,
}

impl QuadratureDecoder {
    pub const fn new() -> Self {
        Self {
            raw_state: AtomicU8::new(LATCH_STATE),
            counts: AtomicI32::new(0),
            published: AtomicU32::new(0),
        }
    }

    /// Feed the current line levels.  Call from the edge interrupt only.
    ///
    /// The ISR is the single writer and does not re-enter itself, so the
    /// read-modify-write sequences below use relaxed ordering; only the
    /// final publish needs `Release`.
    pub fn tick(&self, a: bool, b: bool) {
        let new_state = (a as u8) | ((b as u8) << 1);
        let old_state = self.raw_state.load(Ordering::Relaxed);
        if new_state == old_state {
            return;
        }
        self.raw_state.store(new_state, Ordering::Relaxed);

        let delta = TRANSITION_DELTA[((old_state << 2) | new_state) as usize];
        let counts = self.counts.load(Ordering::Relaxed).wrapping_add(delta as i32);
        self.counts.store(counts, Ordering::Relaxed);

        if new_state != LATCH_STATE {
            return;
        }

        let position = (counts >> 2) as i16;
        let previous = EncoderSnapshot::unpack(self.published.load(Ordering::Relaxed));
        if position == previous.position {
            return;
        }
        let direction = Direction::from_raw(position.wrapping_sub(previous.position).signum() as i8);
        self.published
            .store(EncoderSnapshot { position, direction }.pack(), Ordering::Release);
    }

    /// Atomic snapshot for the main loop.
    pub fn snapshot(&self) -> EncoderSnapshot {
        EncoderSnapshot::unpack(self.published.load(Ordering::Acquire))
    }
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}
