//! Key mapping from terminal events to intents.

use crate::types::Intent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to an intent.
pub fn map_key(key: KeyEvent) -> Option<Intent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('z') | KeyCode::Char('Z') if ctrl => Some(Intent::Undo),
        KeyCode::Char('r') | KeyCode::Char('R') if ctrl => Some(Intent::Reset),
        KeyCode::Char(_) if ctrl => None,

        // Movement
        KeyCode::Left => Some(Intent::MoveLeft),
        KeyCode::Right => Some(Intent::MoveRight),
        KeyCode::Down => Some(Intent::SoftDrop),

        // Rotation
        KeyCode::Up | KeyCode::Char('a') | KeyCode::Char('A') => Some(Intent::Rotate),

        // Actions
        KeyCode::Char(' ') => Some(Intent::HardDrop),
        KeyCode::Tab => Some(Intent::SwapHelper),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(Intent::ClearRows),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q')
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
