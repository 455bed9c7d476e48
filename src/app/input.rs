//! Input snapshot and encoder position tracking.
//!
//! The encoder publishes an absolute, wrapping detent position plus the
//! direction of its last move.  [`EncoderTracker`] remembers the position
//! seen on the previous poll and turns a change into a signed detent count;
//! an unchanged position is a no-op.

use crate::drivers::encoder::EncoderSnapshot;

/// Everything the service reads from the hardware in one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSnapshot {
    pub confirm: bool,
    pub start: bool,
    pub stop: bool,
    pub encoder: EncoderSnapshot,
}

impl InputSnapshot {
    /// No presses, encoder at rest.
    pub const QUIET: Self = Self {
        confirm: false,
        start: false,
        stop: false,
        encoder: EncoderSnapshot::REST,
    };
}

impl Default for InputSnapshot {
    fn default() -> Self {
        Self::QUIET
    }
}

/// Converts successive encoder snapshots into detent steps.
#[derive(Debug, Default)]
pub struct EncoderTracker {
    last_position: i16,
}

impl EncoderTracker {
    pub const fn new() -> Self {
        Self { last_position: 0 }
    }

    /// Signed detent count since the previous call, or `None` if the
    /// position has not moved.
    ///
    /// The wrapping position delta is the net travel, so it gives both the
    /// count and the sign.  The direction flag only reflects the last detent
    /// and is not consulted.
    pub fn steps(&mut self, snap: EncoderSnapshot) -> Option<i16> {
        let delta = snap.position.wrapping_sub(self.last_position);
        if delta == 0 {
            return None;
        }
        self.last_position = snap.position;
        Some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::encoder::Direction;

    fn snap(position: i16, direction: Direction) -> EncoderSnapshot {
        EncoderSnapshot { position, direction }
    }

    #[test]
    fn unchanged_position_is_ignored() {
        let mut t = EncoderTracker::new();
        assert_eq!(t.steps(EncoderSnapshot::REST), None);
        assert_eq!(t.steps(snap(2, Direction::Forward)), Some(2));
        assert_eq!(t.steps(snap(2, Direction::Forward)), None);
    }

    #[test]
    fn delta_gives_count_and_sign() {
        let mut t = EncoderTracker::new();
        assert_eq!(t.steps(snap(-3, Direction::Backward)), Some(-3));
        assert_eq!(t.steps(snap(-1, Direction::Forward)), Some(2));
        assert_eq!(t.steps(snap(-3, Direction::Stationary)), Some(-2));
    }

    #[test]
    fn reversal_between_polls_follows_net_travel() {
        // Knob went back three detents, then its last detent was forward.
        let mut t = EncoderTracker::new();
        assert_eq!(t.steps(snap(-3, Direction::Forward)), Some(-3));
        // Forward net travel with a backward final detent.
        assert_eq!(t.steps(snap(1, Direction::Backward)), Some(4));
    }

    #[test]
    fn position_wrap_is_a_single_step() {
        let mut t = EncoderTracker::new();
        t.steps(snap(i16::MAX, Direction::Forward));
        assert_eq!(t.steps(snap(i16::MIN, Direction::Forward)), Some(1));
    }
}
