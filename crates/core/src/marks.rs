//! Marked-cell overlay for one ticket.

use serde::Serialize;

use crate::ticket::Ticket;
use crate::types::{CellPos, TICKET_COLS, TICKET_ROWS};

/// 3x9 grid of marks, parallel to a [`Ticket`]. Starts all false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct MarkedState {
    cells: [[bool; TICKET_COLS]; TICKET_ROWS],
}

impl MarkedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [[bool; TICKET_COLS]; TICKET_ROWS]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[[bool; TICKET_COLS]; TICKET_ROWS] {
        &self.cells
    }

    /// False for out-of-bounds positions.
    pub fn is_marked(&self, pos: CellPos) -> bool {
        pos.in_bounds() && self.cells[pos.row][pos.col]
    }

    /// Returns false if out of bounds.
    pub fn set(&mut self, pos: CellPos, marked: bool) -> bool {
        if !pos.in_bounds() {
            return false;
        }
        self.cells[pos.row][pos.col] = marked;
        true
    }

    pub fn clear(&mut self) {
        self.cells = [[false; TICKET_COLS]; TICKET_ROWS];
    }

    pub fn marked_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&m| m).count()
    }

    /// Numbers under marked, non-blank cells of `ticket`, row-major.
    pub fn marked_numbers(&self, ticket: &Ticket) -> Vec<(u8, CellPos)> {
        let mut out = Vec::new();
        for (row, cells) in ticket.rows().iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Some(n) = cell {
                    if self.cells[row][col] {
                        out.push((*n, CellPos::new(row, col)));
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_query() {
        let mut marks = MarkedState::new();
        assert_eq!(marks.marked_count(), 0);

        assert!(marks.set(CellPos::new(1, 4), true));
        assert!(marks.is_marked(CellPos::new(1, 4)));
        assert!(!marks.set(CellPos::new(3, 0), true));
        assert!(!marks.is_marked(CellPos::new(0, 9)));
        assert_eq!(marks.marked_count(), 1);

        marks.clear();
        assert_eq!(marks, MarkedState::default());
    }
}
