//! Terminal "game renderer".
//!
//! A small, game-oriented rendering layer for terminal gameplay. It avoids
//! widget toolkits and renders into a plain framebuffer that is diffed and
//! flushed to the terminal.
//!
//! - [`game_view`] is pure: snapshot in, framebuffer out
//! - [`renderer`] owns the terminal and does the I/O
//! - a tile is drawn `tile_w` characters wide to correct the glyph aspect ratio

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use srs_tetris_core as core;
pub use srs_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
