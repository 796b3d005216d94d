//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules and simulation of the game. It has **no**
//! dependencies on terminals or clocks: time comes in as milliseconds from
//! the caller, so a session can be driven headless and replayed from a seed.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of colors, row 0 at the bottom, line clearing
//! - [`pieces`]: tile coordinates, spawn layouts and SRS kick tables
//! - [`tetromino`]: the active piece with movement, rotation and landing
//! - [`timing`]: frame-counted gravity and the millisecond lock delay
//! - [`repeat`]: auto-repeat counters for held keys
//! - [`rng`]: seeded shape selection
//! - [`scoring`]: line-clear points and levels
//! - [`session`]: the per-frame state machine tying it all together
//! - [`snapshot`]: copy-out view of a session for renderers
//!
//! # Game Rules
//!
//! - **SRS Rotation**: five kick candidates per rotation, O never rotates
//! - **Lock Delay**: 500ms on the ground, extended at most 4 times by moves;
//!   reaching a new lowest row restores the extensions
//! - **Gravity**: one row per second at level 1, 10% faster every level
//! - **Hold**: one swap per piece
//! - **Scoring**: 100/300/500/800 for 1-4 lines, a level every 5 lines
//!
//! # Example
//!
//! ```
//! use srs_tetris_core::GameSession;
//! use srs_tetris_types::{GameAction, Screen};
//!
//! let mut game = GameSession::new(12345);
//! assert_eq!(game.screen(), Screen::Playing);
//!
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//! game.update(33);
//!
//! assert_eq!(game.score(), 0); // a single piece clears nothing
//! ```

pub mod board;
pub mod pieces;
pub mod repeat;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod tetromino;
pub mod timing;

pub use srs_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use pieces::{kicks, spawn_layout, spawn_origin, TilePos};
pub use repeat::{AutoRepeat, HeldMoves};
pub use rng::{next_shape, SimpleRng};
pub use scoring::{level_for_lines, line_clear_score};
pub use session::GameSession;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use tetromino::Tetromino;
pub use timing::{Gravity, LockDecision, LockDelay};
