//! Terminal input: crossterm events to per-frame game input.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]s and held-key
//! state, and packages both into one [`crate::types::FrameInput`] per frame.
//! Works with and without key-release events.

pub mod handler;
pub mod map;

pub use srs_tetris_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, held_key, should_quit, HeldKey};
