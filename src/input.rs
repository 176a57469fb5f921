//! Keyboard handling: maps terminal key events to arcade actions.

use crate::arcade::Arcade;
use crate::constants::CADENCE_NUDGE_MS;
use crate::snake::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// UI-agnostic input actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcadeInput {
    Steer(Direction),
    Restart,
    Faster,
    Slower,
    Quit,
    Other,
}

/// Translate a key event. Key releases map to `Other`.
pub fn map_key(key: KeyEvent) -> ArcadeInput {
    if key.kind == KeyEventKind::Release {
        return ArcadeInput::Other;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return ArcadeInput::Quit;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => ArcadeInput::Steer(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            ArcadeInput::Steer(Direction::Down)
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            ArcadeInput::Steer(Direction::Left)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            ArcadeInput::Steer(Direction::Right)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => ArcadeInput::Restart,
        KeyCode::Char('+') | KeyCode::Char('=') => ArcadeInput::Faster,
        KeyCode::Char('-') | KeyCode::Char('_') => ArcadeInput::Slower,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => ArcadeInput::Quit,
        _ => ArcadeInput::Other,
    }
}

/// Apply an input to the arcade. Returns `false` when the player quits.
pub fn process_input(arcade: &mut Arcade, input: ArcadeInput) -> bool {
    match input {
        ArcadeInput::Steer(direction) => arcade.steer(direction),
        ArcadeInput::Restart => arcade.restart(),
        ArcadeInput::Faster => arcade.adjust_cadence(-(CADENCE_NUDGE_MS as i64)),
        ArcadeInput::Slower => arcade.adjust_cadence(CADENCE_NUDGE_MS as i64),
        ArcadeInput::Quit => return false,
        ArcadeInput::Other => {}
    }
    true
}
