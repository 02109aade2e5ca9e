//! Key mapping from terminal events to primitive actions.
//!
//! | key | action |
//! |-----|--------|
//! | `h` | move-left |
//! | `l` | move-right |
//! | `j` | soft-drop |
//! | `k` | rotate-right |
//! | `z` | rotate-left |
//! | `a` | rotate-down |
//! | `space` | hard-drop |
//! | `c` | hold |
//! | `q` | quit |
//!
//! Everything else is ignored. Keys are case-sensitive.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::Primitive;

/// What a single keystroke asks the loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Apply one primitive
    Act(Primitive),
    /// Leave the loop
    Quit,
    /// Ctrl-C while the terminal is in raw mode
    Interrupt,
    /// Unmapped key
    Ignore,
}

/// Map keyboard input to primitive actions.
pub fn handle_key_event(key: KeyEvent) -> Option<Primitive> {
    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    match key.code {
        KeyCode::Char('h') => Some(Primitive::MoveLeft),
        KeyCode::Char('l') => Some(Primitive::MoveRight),
        KeyCode::Char('j') => Some(Primitive::SoftDrop),
        KeyCode::Char('k') => Some(Primitive::RotateRight),
        KeyCode::Char('z') => Some(Primitive::RotateLeft),
        KeyCode::Char('a') => Some(Primitive::RotateDown),
        KeyCode::Char(' ') => Some(Primitive::HardDrop),
        KeyCode::Char('c') => Some(Primitive::Hold),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('q') && !key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Ctrl-C; raw mode delivers it as a key instead of a signal.
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

pub fn classify(key: KeyEvent) -> KeyAction {
    if is_interrupt(key) {
        KeyAction::Interrupt
    } else if should_quit(key) {
        KeyAction::Quit
    } else {
        handle_key_event(key).map_or(KeyAction::Ignore, KeyAction::Act)
    }
}
