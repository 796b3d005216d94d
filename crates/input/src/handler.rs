//! Frame input collector for terminal environments.
//!
//! Turns a stream of crossterm key events into one [`FrameInput`] per frame:
//! one-shot actions in arrival order plus the held state of the movement keys.
//! Terminals that never report key releases are handled with a timeout.

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

use crate::map::{handle_key_event, held_key, HeldKey};
use crate::types::{FrameInput, HeldKeys};

// Terminal auto-repeat arrives every ~30-50ms once it kicks in, but the first
// repeat can take a few hundred ms. A tap that outlives this window without a
// refresh counts as released.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u64 = 150;

/// Tracks held keys and queues one-shot actions between frames.
#[derive(Debug, Clone)]
pub struct InputHandler {
    /// Last press or repeat time per held key, `None` when up
    left: Option<u64>,
    right: Option<u64>,
    soft_drop: Option<u64>,
    pending: FrameInput,
    release_events: bool,
    key_release_timeout_ms: u64,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            left: None,
            right: None,
            soft_drop: None,
            pending: FrameInput::default(),
            release_events: false,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    /// Trust release events instead of timing keys out
    pub fn with_release_events(mut self, enabled: bool) -> Self {
        self.release_events = enabled;
        self
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u64 {
        self.key_release_timeout_ms
    }

    pub fn release_events(&self) -> bool {
        self.release_events
    }

    fn slot(&mut self, key: HeldKey) -> &mut Option<u64> {
        match key {
            HeldKey::Left => &mut self.left,
            HeldKey::Right => &mut self.right,
            HeldKey::SoftDrop => &mut self.soft_drop,
        }
    }

    pub fn handle_event(&mut self, event: &Event, now_ms: u64) {
        if let Event::Key(key) = event {
            self.handle_key(*key, now_ms);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now_ms: u64) {
        if let Some(held) = held_key(key.code) {
            let slot = self.slot(held);
            match key.kind {
                KeyEventKind::Press | KeyEventKind::Repeat => *slot = Some(now_ms),
                KeyEventKind::Release => *slot = None,
            }
            return;
        }

        // Terminal auto-repeat must not turn into repeated hard drops.
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(action) = handle_key_event(key) {
            // Presses past the per-frame capacity are dropped.
            let _ = self.pending.actions.try_push(action);
        }
    }

    /// Close the current frame and hand back what it collected.
    pub fn take_frame(&mut self, now_ms: u64) -> FrameInput {
        if !self.release_events {
            let timeout = self.key_release_timeout_ms;
            for slot in [&mut self.left, &mut self.right, &mut self.soft_drop] {
                if slot.is_some_and(|t| now_ms.saturating_sub(t) > timeout) {
                    *slot = None;
                }
            }
        }

        let mut frame = std::mem::take(&mut self.pending);
        frame.held = HeldKeys {
            left: self.left.is_some(),
            right: self.right.is_some(),
            soft_drop: self.soft_drop.is_some(),
        };
        frame
    }

    /// Drain every queued terminal event without blocking, then close the frame.
    pub fn poll_frame(&mut self, now_ms: u64) -> Result<FrameInput> {
        while event::poll(Duration::ZERO)? {
            let ev = event::read()?;
            self.handle_event(&ev, now_ms);
        }
        Ok(self.take_frame(now_ms))
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
