//! Gravity and lock delay
//!
//! Gravity counts frames; the lock delay runs on wall-clock milliseconds that
//! the caller passes in, so the core never reads a clock itself.

use crate::types::{DEFAULT_FPS, LOCK_DELAY_MS, LOCK_RESET_LIMIT, MULTI_DROP_LEVEL};

/// Frame-counted automatic descent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gravity {
    frame_count: u32,
    frames_for_gravity: u32,
}

impl Gravity {
    /// Level-1 gravity: one row per `fps` frames (one second)
    pub fn new(fps: u32) -> Self {
        Self {
            frame_count: 0,
            frames_for_gravity: fps,
        }
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    pub fn frames_for_gravity(&self) -> u32 {
        self.frames_for_gravity
    }

    /// Advance one frame and return how many rows the piece should fall.
    ///
    /// A zero interval means "faster than one row per frame": past
    /// [`MULTI_DROP_LEVEL`] the piece falls `level - 30` extra rows.
    pub fn tick(&mut self, level: u32) -> u32 {
        self.advance();
        self.due(level)
    }

    /// Count one frame without checking for a descent
    pub fn advance(&mut self) {
        self.frame_count += 1;
    }

    /// Rows due at the current count; resets the count when any are due
    pub fn due(&mut self, level: u32) -> u32 {
        if self.frames_for_gravity != 0 && self.frame_count < self.frames_for_gravity {
            return 0;
        }
        self.frame_count = 0;
        if self.frames_for_gravity == 0 && level > MULTI_DROP_LEVEL {
            1 + (level - MULTI_DROP_LEVEL)
        } else {
            1
        }
    }

    /// Start counting the next descent from zero
    pub fn restart(&mut self) {
        self.frame_count = 0;
    }

    /// Shrink the interval by 10%, truncating
    pub fn speed_up(&mut self) {
        self.frames_for_gravity = self.frames_for_gravity * 9 / 10;
    }
}

impl Default for Gravity {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}

/// Outcome of a lock-delay check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockDecision {
    /// Keep the piece in play
    Wait,
    /// Fix the piece to the board now
    Lock,
}

/// Lock-delay bookkeeping for the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockDelay {
    /// Lowest pivot row reached by the current piece
    furthest_down: Option<i32>,
    reset_pending: bool,
    resets: u8,
    timer_start: Option<u64>,
}

impl LockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything; called for every new piece
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn resets(&self) -> u8 {
        self.resets
    }

    pub fn reset_pending(&self) -> bool {
        self.reset_pending
    }

    /// Record the pivot row after a descent. A new lowest row restarts the
    /// window and returns the reset credits.
    pub fn note_pivot(&mut self, row: i32, now_ms: u64) {
        if self.furthest_down.map_or(true, |lowest| row < lowest) {
            self.furthest_down = Some(row);
            self.timer_start = Some(now_ms);
            self.resets = 0;
        }
    }

    /// A successful move or rotation asks for one more window
    pub fn request_reset(&mut self) {
        self.reset_pending = true;
    }

    /// Check the window for a grounded piece.
    pub fn poll(&mut self, grounded: bool, now_ms: u64) -> LockDecision {
        if !grounded {
            return LockDecision::Wait;
        }
        let start = *self.timer_start.get_or_insert(now_ms);
        if now_ms.saturating_sub(start) < LOCK_DELAY_MS {
            return LockDecision::Wait;
        }

        let extend = self.reset_pending && self.resets < LOCK_RESET_LIMIT;
        self.reset_pending = false;
        if extend {
            self.resets += 1;
            self.timer_start = Some(now_ms);
            LockDecision::Wait
        } else {
            LockDecision::Lock
        }
    }
}
