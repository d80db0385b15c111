//! Ticket module - the 3x9 Tambola grid
//!
//! A ticket is immutable once dealt. Cells are `Option<u8>`; a valid ticket has
//! exactly five numbers per row, every number inside its column's decade, and
//! no number twice. Generated tickets also keep each column ascending from top
//! to bottom.
//!
//! Coordinates: (row, col) where row ranges 0..2 (top to bottom) and col
//! ranges 0..8 (left to right).

use std::fmt;

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::error::TicketError;
use crate::types::{
    column_range, Cell, CellPos, MAX_NUMBER, NUMBERS_PER_ROW, TICKET_COLS, TICKET_ROWS,
};

/// Row-major grid storage.
pub type Grid = [[Cell; TICKET_COLS]; TICKET_ROWS];

/// A Tambola ticket
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTicket")]
pub struct Ticket {
    rows: Grid,
}

/// Wire shape accepted on deserialization; validated before becoming a [`Ticket`].
#[derive(Debug, Clone, Deserialize)]
struct RawTicket {
    rows: Vec<Vec<Cell>>,
}

impl TryFrom<RawTicket> for Ticket {
    type Error = TicketError;

    fn try_from(raw: RawTicket) -> Result<Self, Self::Error> {
        Ticket::from_rows(raw.rows)
    }
}

impl Ticket {
    /// Wrap a grid as-is. No invariants are checked; see [`Ticket::check`].
    pub fn from_grid(rows: Grid) -> Self {
        Self { rows }
    }

    /// Build a ticket from caller-supplied rows, rejecting anything invalid.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, TicketError> {
        check_rows(&rows)?;

        let mut grid: Grid = [[None; TICKET_COLS]; TICKET_ROWS];
        for (dst, src) in grid.iter_mut().zip(rows.iter()) {
            dst.copy_from_slice(src);
        }
        Ok(Self { rows: grid })
    }

    pub fn rows(&self) -> &Grid {
        &self.rows
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Number at a position; `None` for blanks and out-of-bounds positions.
    pub fn number_at(&self, pos: CellPos) -> Option<u8> {
        self.get(pos.row, pos.col).flatten()
    }

    /// All numbers in row-major order.
    pub fn numbers(&self) -> ArrayVec<u8, { TICKET_ROWS * TICKET_COLS }> {
        self.rows.iter().flatten().filter_map(|c| *c).collect()
    }

    /// Numbers of one row, left to right.
    pub fn row_numbers(&self, row: usize) -> ArrayVec<u8, TICKET_COLS> {
        match self.rows.get(row) {
            Some(cells) => cells.iter().filter_map(|c| *c).collect(),
            None => ArrayVec::new(),
        }
    }

    /// Positions of the filled cells of one row.
    pub fn row_cells(&self, row: usize) -> ArrayVec<CellPos, TICKET_COLS> {
        match self.rows.get(row) {
            Some(cells) => cells
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_some())
                .map(|(col, _)| CellPos::new(row, col))
                .collect(),
            None => ArrayVec::new(),
        }
    }

    pub fn position_of(&self, number: u8) -> Option<CellPos> {
        for (row, cells) in self.rows.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if *cell == Some(number) {
                    return Some(CellPos::new(row, col));
                }
            }
        }
        None
    }

    pub fn contains(&self, number: u8) -> bool {
        self.position_of(number).is_some()
    }

    /// Check if the filled cells of every column strictly increase downwards
    pub fn columns_sorted(&self) -> bool {
        (0..TICKET_COLS).all(|col| {
            let column: ArrayVec<u8, TICKET_ROWS> =
                self.rows.iter().filter_map(|r| r[col]).collect();
            column.windows(2).all(|w| w[0] < w[1])
        })
    }

    /// Report the first broken invariant, if any.
    pub fn check(&self) -> Result<(), TicketError> {
        check_rows(&self.rows)
    }
}

/// Check a ticket against every structural rule. Never panics.
pub fn validate_ticket(ticket: &Ticket) -> bool {
    ticket.check().is_ok()
}

/// Like [`validate_ticket`] for grids of unknown shape.
pub fn validate_grid<R: AsRef<[Cell]>>(rows: &[R]) -> bool {
    check_rows(rows).is_ok()
}

fn check_rows<R: AsRef<[Cell]>>(rows: &[R]) -> Result<(), TicketError> {
    if rows.len() != TICKET_ROWS || rows.iter().any(|r| r.as_ref().len() != TICKET_COLS) {
        return Err(TicketError::Shape {
            rows: rows.len(),
            widths: rows.iter().map(|r| r.as_ref().len()).collect(),
        });
    }

    for (row, cells) in rows.iter().enumerate() {
        let count = cells.as_ref().iter().filter(|c| c.is_some()).count();
        if count != NUMBERS_PER_ROW {
            return Err(TicketError::RowCount { row, count });
        }
    }

    for (row, cells) in rows.iter().enumerate() {
        for (col, cell) in cells.as_ref().iter().enumerate() {
            let Some(number) = *cell else {
                continue;
            };
            let (min, max) = column_range(col);
            if number < min || number > max {
                return Err(TicketError::OutOfColumnRange {
                    number,
                    pos: CellPos::new(row, col),
                    min,
                    max,
                });
            }
        }
    }

    let mut seen = [false; MAX_NUMBER as usize + 1];
    for number in rows.iter().flat_map(|r| r.as_ref().iter().filter_map(|c| *c)) {
        // Range check above guarantees 1..=90.
        let slot = &mut seen[number as usize];
        if *slot {
            return Err(TicketError::Duplicate { number });
        }
        *slot = true;
    }

    Ok(())
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                match cell {
                    Some(n) => write!(f, "{:>2}", n)?,
                    None => f.write_str(" .")?,
                }
            }
        }
        Ok(())
    }
}
