//! SRS Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, tests and
//! benches share a single `srs_tetris::{core,input,term,types}` path. The
//! runtime configuration and the event log live here because only the
//! binary needs them.

pub mod config;
pub mod event_log;

pub use srs_tetris_core as core;
pub use srs_tetris_input as input;
pub use srs_tetris_term as term;
pub use srs_tetris_types as types;

pub use config::AppConfig;
pub use event_log::EventLog;
