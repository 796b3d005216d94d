//! Read-only frame snapshot for renderers.
//!
//! Everything a renderer needs is copied out once per frame, so drawing never
//! borrows the live session.

use crate::board::Board;
use crate::pieces::TilePos;
use crate::tetromino::Tetromino;
use crate::types::{BlockType, Color, Rotation, Screen, DEFAULT_FPS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: BlockType,
    pub rotation: Rotation,
    pub color: Color,
    /// Pivot last, same order as the live piece
    pub cells: [TilePos; 4],
}

impl From<&Tetromino> for ActiveSnapshot {
    fn from(value: &Tetromino) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            color: value.color(),
            cells: *value.cells(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Board,
    pub active: Option<ActiveSnapshot>,
    /// Cells of the piece after a hard drop
    pub shadow: Option<[TilePos; 4]>,
    pub screen: Screen,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub hold: Option<BlockType>,
    pub hold_locked: bool,
    pub frames_for_gravity: u32,
}

impl GameSnapshot {
    pub fn game_over(&self) -> bool {
        self.screen == Screen::AwaitBegin
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: Board::new(),
            active: None,
            shadow: None,
            screen: Screen::Playing,
            score: 0,
            level: 1,
            lines: 0,
            hold: None,
            hold_locked: false,
            frames_for_gravity: DEFAULT_FPS,
        }
    }
}
