//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(GameAction::MoveRight),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(GameAction::MoveUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(GameAction::MoveDown),

        // Ticket selection
        KeyCode::Tab | KeyCode::Char(']') => Some(GameAction::NextTicket),
        KeyCode::BackTab | KeyCode::Char('[') => Some(GameAction::PrevTicket),

        // Game
        KeyCode::Char(' ') | KeyCode::Char('d') | KeyCode::Char('D') => Some(GameAction::Draw),
        KeyCode::Enter | KeyCode::Char('x') | KeyCode::Char('X') => Some(GameAction::Mark),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(GameAction::ToggleAutoCall),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(GameAction::ToggleMarkMode),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(GameAction::AddTicket),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameAction::NewTickets),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Reset),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
