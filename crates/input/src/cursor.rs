//! Cell cursor for manual marking.
//!
//! The cursor points at one cell of one ticket. Moves stop at the grid edges;
//! ticket selection wraps around.

use crate::types::{CellPos, GameAction, TICKET_COLS, TICKET_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TicketCursor {
    ticket: usize,
    row: usize,
    col: usize,
}

impl TicketCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticket(&self) -> usize {
        self.ticket
    }

    pub fn pos(&self) -> CellPos {
        CellPos::new(self.row, self.col)
    }

    /// Apply a cursor action. Returns false for actions that are not cursor
    /// moves, or when the cursor did not move.
    pub fn apply(&mut self, action: GameAction, ticket_count: usize) -> bool {
        let before = *self;
        match action {
            GameAction::MoveLeft => self.col = self.col.saturating_sub(1),
            GameAction::MoveRight => self.col = (self.col + 1).min(TICKET_COLS - 1),
            GameAction::MoveUp => self.row = self.row.saturating_sub(1),
            GameAction::MoveDown => self.row = (self.row + 1).min(TICKET_ROWS - 1),
            GameAction::NextTicket if ticket_count > 0 => {
                self.ticket = (self.ticket + 1) % ticket_count;
            }
            GameAction::PrevTicket if ticket_count > 0 => {
                self.ticket = (self.ticket + ticket_count - 1) % ticket_count;
            }
            _ => return false,
        }
        *self != before
    }

    /// Keep the ticket index valid after the ticket list changed.
    pub fn clamp(&mut self, ticket_count: usize) {
        if self.ticket >= ticket_count {
            self.ticket = ticket_count.saturating_sub(1);
        }
    }

    pub fn select(&mut self, ticket: usize, ticket_count: usize) {
        self.ticket = ticket;
        self.clamp(ticket_count);
    }
}
