//! Runtime configuration: command-line flags, then `TETRIS_*` environment
//! variables, then defaults.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;

use crate::types::{DEFAULT_FPS, DEFAULT_TILE_WIDTH, MAX_TILE_WIDTH};

const CONTROLS: &str = "\
Falling-block puzzle with SRS rotation, lock delay and hold.

CONTROLS:
  Left/Right  Move        Down        Soft drop    Space  Hard drop
  Up / x      Rotate CW   z           Rotate CCW   c      Hold
  Enter       New round   q / Esc     Quit

Space also starts a new round after a game over.";

/// Terminal falling-block game with SRS rotation, lock delay and hold.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "srs-tetris", version, long_about = CONTROLS)]
pub struct AppConfig {
    /// Frames per second; gravity is one row per second at level 1
    #[arg(
        long,
        env = "TETRIS_FPS",
        value_name = "N",
        default_value_t = DEFAULT_FPS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub fps: u32,

    /// RNG seed; the same seed deals the same pieces [default: from the clock]
    #[arg(long, env = "TETRIS_SEED", value_name = "N")]
    pub seed: Option<u32>,

    /// Terminal columns per board tile
    #[arg(
        long,
        env = "TETRIS_TILE_WIDTH",
        value_name = "N",
        default_value_t = DEFAULT_TILE_WIDTH,
        value_parser = clap::value_parser!(u16).range(1..=MAX_TILE_WIDTH as i64)
    )]
    pub tile_width: u16,

    /// Append game events to this file as JSON lines
    #[arg(long = "log", env = "TETRIS_LOG_PATH", value_name = "PATH")]
    pub log_path: Option<PathBuf>,
}

impl AppConfig {
    /// The configured seed, or one taken from the wall clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(clock_seed)
    }

    /// Wall-clock time one frame should take.
    pub fn frame_budget(&self) -> Duration {
        Duration::from_millis(1000 / self.fps.max(1) as u64)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
