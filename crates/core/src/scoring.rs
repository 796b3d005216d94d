//! Scoring module - classic line-clear table and level progression
//!
//! No drop points, combos, back-to-back or T-spin bonuses.

use crate::types::{LINES_PER_LEVEL, LINE_SCORES};

/// Points for clearing `lines` rows with a single lock
pub fn line_clear_score(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}

/// Level for a running line total (starts at 1, +1 every 5 lines)
pub fn level_for_lines(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}
