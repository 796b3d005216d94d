//! Frame-counted auto-repeat for held keys.
//!
//! Shifts fire on the first held frame, pause, then repeat; soft drop repeats
//! at a fixed cadence from the first frame.

use crate::types::{
    Direction, HeldKeys, SHIFT_DELAY_FRAMES, SHIFT_REPEAT_FRAMES, SOFT_DROP_REPEAT_FRAMES,
};

/// Moves requested by held keys for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldMoves {
    pub soft_drop: bool,
    pub shift: Option<Direction>,
}

/// Per-key held-frame counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoRepeat {
    down_frames: u32,
    left_frames: u32,
    right_frames: u32,
}

impl AutoRepeat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Advance one frame of held-key state.
    ///
    /// Holding left and right together cancels shifting and freezes both
    /// counters for that frame.
    pub fn step(&mut self, held: HeldKeys) -> HeldMoves {
        let mut moves = HeldMoves::default();

        if held.soft_drop {
            moves.soft_drop = self.down_frames % SOFT_DROP_REPEAT_FRAMES == 0;
            self.down_frames += 1;
        } else {
            self.down_frames = 0;
        }

        if held.left && held.right {
            return moves;
        }

        if Self::shift_due(&mut self.left_frames, held.left) {
            moves.shift = Some(Direction::Left);
        }
        if Self::shift_due(&mut self.right_frames, held.right) {
            moves.shift = Some(Direction::Right);
        }
        moves
    }

    fn shift_due(frames: &mut u32, held: bool) -> bool {
        if !held {
            *frames = 0;
            return false;
        }
        let n = *frames;
        *frames += 1;
        n == 0 || (n > SHIFT_DELAY_FRAMES && n % SHIFT_REPEAT_FRAMES == 0)
    }
}
