//! Pieces module - spawn layouts and SRS wall kick tables
//!
//! Every layout lists four tiles relative to the spawn reference tile; the
//! **last tile is the pivot** that rotation turns the other three around.
//! Reference: https://tetris.wiki/Super_Rotation_System

use crate::types::{BlockType, Rotation, COLUMNS, ROWS};

/// A board tile position. Rows grow upward; `row >= ROWS` is above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TilePos {
    pub col: i32,
    pub row: i32,
}

impl TilePos {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self {
            col: self.col + dcol,
            row: self.row + drow,
        }
    }

    /// Inside the visible board
    pub fn in_bounds(&self) -> bool {
        self.col >= 0 && self.col < COLUMNS as i32 && self.row >= 0 && self.row < ROWS as i32
    }
}

/// Four (col, row) offsets from the spawn reference tile, pivot last
pub type SpawnLayout = [(i32, i32); 4];

/// Spawn layout for a shape
pub fn spawn_layout(kind: BlockType) -> SpawnLayout {
    match kind {
        BlockType::I => [(-1, 0), (1, 0), (2, 0), (0, 0)],
        BlockType::O => [(0, 1), (1, 1), (1, 0), (0, 0)],
        BlockType::T => [(-1, 0), (1, 0), (0, 1), (0, 0)],
        BlockType::L => [(0, 0), (2, 0), (2, 1), (1, 0)],
        BlockType::J => [(0, 1), (0, 0), (2, 0), (1, 0)],
        BlockType::S => [(0, 1), (1, 1), (2, 0), (1, 0)],
        BlockType::Z => [(2, 1), (1, 1), (0, 0), (1, 0)],
    }
}

/// Extra spawn rows granted when the stack reaches near the top
pub fn spawn_height_offset(stack_height: Option<usize>) -> i32 {
    match stack_height {
        Some(h) if h >= ROWS - 1 => 2,
        Some(h) if h >= ROWS - 4 => 1,
        _ => 0,
    }
}

/// Spawn reference tile for the given stack height
pub fn spawn_origin(stack_height: Option<usize>) -> TilePos {
    TilePos::new(
        COLUMNS as i32 / 2 - 1,
        ROWS as i32 - 2 + spawn_height_offset(stack_height),
    )
}

/// Five (dx, dy) kick offsets, tried in order.
///
/// `dy` follows screen orientation (+dy is one tile **down**), so a kick
/// moves a tile by `col += dx, row -= dy`.
pub type KickSet = [(i32, i32); 5];

/// Kick table indexed by transition: 0->1, 1->0, 1->2, 2->1, 2->3, 3->2, 3->0, 0->3
pub type KickTable = [KickSet; 8];

/// J, L, S, T, Z kick table
const JLSTZ_KICKS: KickTable = [
    // 0->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 1->0
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    // 1->2
    [(0, 0), (1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->1
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    // 2->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    // 3->2
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 3->0
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
    // 0->3
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
];

/// I piece kick table
const I_KICKS: KickTable = [
    // 0->1
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 1->0
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 1->2
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    // 2->1
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 2->3
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    // 3->2
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    // 3->0
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
    // 0->3
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
];

/// Table slot for a (from, to) pair; None unless the pair is a quarter turn
fn transition_index(from: Rotation, to: Rotation) -> Option<usize> {
    use Rotation::*;
    match (from, to) {
        (North, East) => Some(0),
        (East, North) => Some(1),
        (East, South) => Some(2),
        (South, East) => Some(3),
        (South, West) => Some(4),
        (West, South) => Some(5),
        (West, North) => Some(6),
        (North, West) => Some(7),
        _ => None,
    }
}

/// Kick candidates for a shape and transition. O has no kicks.
pub fn kicks(kind: BlockType, from: Rotation, to: Rotation) -> Option<&'static KickSet> {
    let table = match kind {
        BlockType::O => return None,
        BlockType::I => &I_KICKS,
        _ => &JLSTZ_KICKS,
    };
    transition_index(from, to).map(|i| &table[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_layout_is_four_distinct_tiles() {
        for kind in BlockType::ALL {
            let layout = spawn_layout(kind);
            for i in 0..4 {
                for j in (i + 1)..4 {
                    assert_ne!(layout[i], layout[j], "{:?}", kind);
                }
            }
        }
    }

    #[test]
    fn kicks_start_with_identity() {
        use Rotation::*;
        for kind in [BlockType::I, BlockType::T] {
            for (from, to) in [(North, East), (East, North), (West, North), (North, West)] {
                assert_eq!(kicks(kind, from, to).unwrap()[0], (0, 0));
            }
        }
    }

    #[test]
    fn half_turns_have_no_kicks() {
        assert!(kicks(BlockType::T, Rotation::North, Rotation::South).is_none());
        assert!(kicks(BlockType::I, Rotation::East, Rotation::West).is_none());
    }

    #[test]
    fn height_offset_thresholds() {
        assert_eq!(spawn_height_offset(None), 0);
        assert_eq!(spawn_height_offset(Some(15)), 0);
        assert_eq!(spawn_height_offset(Some(16)), 1);
        assert_eq!(spawn_height_offset(Some(18)), 1);
        assert_eq!(spawn_height_offset(Some(19)), 2);
    }
}
