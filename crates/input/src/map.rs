//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keys whose held state matters frame to frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeldKey {
    Left,
    Right,
    SoftDrop,
}

/// Map a key press to a one-shot game action.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if should_quit(key) {
        return Some(GameAction::Quit);
    }

    match key.code {
        KeyCode::Enter => Some(GameAction::Start),
        KeyCode::Char(' ') => Some(GameAction::HardDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('x') | KeyCode::Char('X') => Some(GameAction::RotateCw),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(GameAction::RotateCcw),

        KeyCode::Char('c') | KeyCode::Char('C') => Some(GameAction::Hold),

        _ => None,
    }
}

/// Map a key to the held state it drives, if any.
pub fn held_key(code: KeyCode) -> Option<HeldKey> {
    match code {
        KeyCode::Left => Some(HeldKey::Left),
        KeyCode::Right => Some(HeldKey::Right),
        KeyCode::Down => Some(HeldKey::SoftDrop),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
