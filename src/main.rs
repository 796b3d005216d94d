//! Terminal Tetris runner (default binary).
//!
//! Fixed-rate frame loop: poll input, advance the session, render, sleep out
//! the rest of the frame.

use std::thread;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use srs_tetris::config::AppConfig;
use srs_tetris::core::{GameSession, GameSnapshot};
use srs_tetris::event_log::EventLog;
use srs_tetris::input::InputHandler;
use srs_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = AppConfig::parse();
    let mut log = EventLog::open(config.log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    let result = term
        .enter()
        .and_then(|release_events| run(&mut term, &config, &mut log, release_events));

    // Always try to restore terminal state.
    let _ = term.exit();

    let flushed = log.finish();
    result?;
    flushed?;
    Ok(())
}

fn run(
    term: &mut TerminalRenderer,
    config: &AppConfig,
    log: &mut EventLog,
    release_events: bool,
) -> Result<()> {
    let clock = Instant::now();
    let budget = config.frame_budget();

    let mut session = GameSession::new(config.seed_or_clock()).with_fps(config.fps);
    let mut input = InputHandler::new().with_release_events(release_events);
    let view = GameView::new(config.tile_width, 1);

    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let frame_start = Instant::now();
        let now_ms = clock.elapsed().as_millis() as u64;

        let frame = input.poll_frame(now_ms)?;
        if frame.quit_requested() {
            return Ok(());
        }

        session.process_frame(&frame, now_ms);
        for event in session.drain_events() {
            log.record(now_ms, &event);
        }

        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        if let Some(rest) = budget.checked_sub(frame_start.elapsed()) {
            thread::sleep(rest);
        }
    }
}
