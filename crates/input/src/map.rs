//! Mapping from terminal events to grid actions.

use crate::types::GridAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Map keyboard input to grid actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GridAction> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h' | 'H' | 'a' | 'A') => Some(GridAction::CursorLeft),
        KeyCode::Right | KeyCode::Char('l' | 'L' | 'd' | 'D') => Some(GridAction::CursorRight),
        KeyCode::Up | KeyCode::Char('k' | 'K' | 'w' | 'W') => Some(GridAction::CursorUp),
        KeyCode::Down | KeyCode::Char('j' | 'J' | 's' | 'S') => Some(GridAction::CursorDown),

        // Select
        KeyCode::Char(' ') | KeyCode::Enter => Some(GridAction::Select),

        // Reset
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GridAction::Reset),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Terminal position `(column, row)` of a left-button press.
///
/// Turning the position into a grid cell is the renderer's job, since only it knows
/// where the grid was drawn.
pub fn mouse_click(event: MouseEvent) -> Option<(u16, u16)> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some((event.column, event.row)),
        _ => None,
    }
}
