//! Error types for the core.
//!
//! Drawing from an empty pool and marking an uncalled number are not errors;
//! they are reported through `Option` and [`crate::player::MarkOutcome`].

use thiserror::Error;

use crate::types::CellPos;

/// A grid that breaks one of the ticket invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TicketError {
    /// Grid is not 3 rows of 9 cells.
    #[error("ticket must be 3x9, got {rows} rows (row widths {widths:?})")]
    Shape { rows: usize, widths: Vec<usize> },

    /// A row does not hold exactly five numbers.
    #[error("row {row} holds {count} numbers, expected 5")]
    RowCount { row: usize, count: usize },

    /// A number sits outside its column's decade.
    #[error("number {number} at {pos:?} is outside column range {min}-{max}")]
    OutOfColumnRange {
        number: u8,
        pos: CellPos,
        min: u8,
        max: u8,
    },

    /// A number appears twice on the ticket.
    #[error("number {number} appears more than once")]
    Duplicate { number: u8 },
}

/// Errors returned by [`crate::session::GameSession`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("no ticket with index {index} (session holds {count})")]
    UnknownTicket { index: usize, count: usize },

    #[error("cell {pos:?} is outside the 3x9 grid")]
    CellOutOfBounds { pos: CellPos },

    #[error("ticket limit reached ({limit})")]
    TicketLimit { limit: usize },
}
