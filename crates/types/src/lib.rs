//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be
//! shared by the simulation core, the terminal renderer and the input layer.
//!
//! # Board Dimensions
//!
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Rows**: 20 (indexed 0-19, **row 0 is the bottom**)
//! - **Spawn reference tile**: column 4, row 18
//!
//! # Timing Constants
//!
//! Gravity is counted in frames, the lock delay in wall-clock milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FPS` | 30 | Target frame rate, also the level-1 gravity interval |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a grounded piece locks |
//! | `LOCK_RESET_LIMIT` | 4 | Lock window restarts granted per grounding |
//! | `SOFT_DROP_REPEAT_FRAMES` | 4 | Soft drop repeats every 4th held frame |
//! | `SHIFT_DELAY_FRAMES` | 6 | Frames a shift key is held before auto-repeat |
//! | `SHIFT_REPEAT_FRAMES` | 4 | Auto-repeat interval for shifts |
//!
//! # Examples
//!
//! ```
//! use srs_tetris_types::{BlockType, Rotation, GameAction, COLUMNS, ROWS};
//!
//! assert_eq!(BlockType::T.as_str(), "T");
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_ne!(GameAction::HardDrop, GameAction::Start);
//! assert_eq!((COLUMNS, ROWS), (10, 20));
//! ```

use arrayvec::ArrayVec;

/// Board width in tiles
pub const COLUMNS: usize = 10;

/// Board height in tiles
pub const ROWS: usize = 20;

/// Number of tiles on the board
pub const TOTAL_TILE_COUNT: usize = COLUMNS * ROWS;

/// Default frame rate (frames per second)
pub const DEFAULT_FPS: u32 = 30;

/// Default tile width in terminal columns (2x1 compensates for glyph aspect ratio)
pub const DEFAULT_TILE_WIDTH: u16 = 2;

/// Widest tile the renderer accepts, in terminal columns
pub const MAX_TILE_WIDTH: u16 = 8;

/// Lock delay once the active piece is grounded (500ms)
pub const LOCK_DELAY_MS: u64 = 500;

/// Maximum number of lock window restarts per grounding episode
pub const LOCK_RESET_LIMIT: u8 = 4;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 5;

/// Level above which a zero gravity interval drops the piece several rows per frame
pub const MULTI_DROP_LEVEL: u32 = 30;

/// Soft drop moves on every 4th frame the key is held (starting with the first)
pub const SOFT_DROP_REPEAT_FRAMES: u32 = 4;

/// Frames a shift key must be held before auto-repeat kicks in
pub const SHIFT_DELAY_FRAMES: u32 = 6;

/// Auto-repeat interval for held shift keys
pub const SHIFT_REPEAT_FRAMES: u32 = 4;

/// Line clear scoring table, indexed by simultaneous lines cleared
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// 24-bit RGB color of a board tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Unoccupied board cell
    pub const EMPTY: Color = Color::new(30, 30, 30);
    /// Reserved, never written by game logic
    pub const DEAD: Color = Color::new(50, 30, 30);
    /// Shadow (ghost) piece
    pub const SHADOW: Color = Color::new(50, 50, 50);

    pub const RED: Color = Color::new(255, 0, 0);
    pub const ORANGE: Color = Color::new(255, 127, 0);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const LIGHT_BLUE: Color = Color::new(0, 144, 255);
    pub const DARK_BLUE: Color = Color::new(0, 97, 171);
    pub const VIOLET: Color = Color::new(127, 0, 255);

    pub fn is_empty(&self) -> bool {
        *self == Color::EMPTY
    }
}

/// The seven tetromino shapes
///
/// Absence of a shape (no hold, nothing spawned yet) is `Option<BlockType>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl BlockType {
    /// All shapes, in spawn-table order
    pub const ALL: [BlockType; 7] = [
        BlockType::I,
        BlockType::O,
        BlockType::T,
        BlockType::L,
        BlockType::J,
        BlockType::S,
        BlockType::Z,
    ];

    /// Designated color of the shape
    pub fn color(&self) -> Color {
        match self {
            BlockType::I => Color::LIGHT_BLUE,
            BlockType::O => Color::YELLOW,
            BlockType::T => Color::VIOLET,
            BlockType::L => Color::ORANGE,
            BlockType::J => Color::RED,
            BlockType::S => Color::GREEN,
            BlockType::Z => Color::DARK_BLUE,
        }
    }

    /// Single-letter name, shown in the hold panel and the event log
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::I => "I",
            BlockType::O => "O",
            BlockType::T => "T",
            BlockType::L => "L",
            BlockType::J => "J",
            BlockType::S => "S",
            BlockType::Z => "Z",
        }
    }
}

/// Rotation states following the Super Rotation System (SRS)
///
/// The discriminant is the number of clockwise quarter-turns from spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use srs_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn rotate(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotate_cw(),
            RotationDirection::CounterClockwise => self.rotate_ccw(),
        }
    }
}

/// Direction of a rotation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    /// +1 for clockwise, -1 for counter-clockwise
    pub fn sign(&self) -> i32 {
        match self {
            RotationDirection::Clockwise => 1,
            RotationDirection::CounterClockwise => -1,
        }
    }
}

/// Horizontal shift direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta: -1 for left, +1 for right
    pub fn dx(&self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Top-level session screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Round over, waiting for an explicit start input
    AwaitBegin,
    Playing,
}

/// Discrete "pressed this frame" inputs
///
/// Left, right and soft drop are continuous and travel in [`HeldKeys`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Leave the frame loop
    Quit,
    /// Begin a new round from the game-over screen
    Start,
    /// Drop the piece to its landing row and lock it
    HardDrop,
    /// Rotate 90° clockwise
    RotateCw,
    /// Rotate 90° counter-clockwise
    RotateCcw,
    /// Bank the current shape (once per piece)
    Hold,
}

/// Continuous "key currently held" state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub soft_drop: bool,
}

/// Everything the input handler produced for one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub actions: ArrayVec<GameAction, 16>,
    pub held: HeldKeys,
}

impl FrameInput {
    pub fn quit_requested(&self) -> bool {
        self.actions.contains(&GameAction::Quit)
    }
}

/// Core-side notable event, consumed by observers such as the event log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new round began (startup or restart)
    Started,
    /// A piece entered play
    Spawned { kind: BlockType },
    /// The active shape went into the hold slot
    Held { kind: BlockType, swapped_in: Option<BlockType> },
    /// A piece locked into the board
    Locked {
        kind: BlockType,
        lines_cleared: u32,
        points: u32,
        score: u32,
    },
    /// Level increased after a line clear
    LevelUp { level: u32, frames_for_gravity: u32 },
    /// A piece locked above the visible board
    GameOver { score: u32, level: u32, lines: u32 },
}
