//! Ticket generator - random tickets that always pass validation
//!
//! One attempt runs in four steps:
//!
//! 1. Every column draws how many numbers it gets, uniformly from `{1, 2, 3}`.
//! 2. Those numbers are drawn without replacement from the column's decade and
//!    dropped into randomly chosen distinct rows.
//! 3. Rows are rebalanced to exactly five numbers: short rows get an unused
//!    number in a random blank cell, long rows lose random cells.
//! 4. Each column is re-sorted ascending top to bottom. This only reorders
//!    numbers within a column; it never changes which numbers are on the ticket.
//!
//! An attempt that ends invalid is discarded and the whole ticket is drawn
//! again, so [`TicketGenerator::generate_single_ticket`] never hands out a
//! ticket that fails [`validate_ticket`](crate::ticket::validate_ticket).

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::error::TicketError;
use crate::rng::SimpleRng;
use crate::ticket::{Grid, Ticket};
use crate::types::{column_range, NUMBERS_PER_ROW, TICKET_COLS, TICKET_ROWS};

/// Produces tickets from an injected random source.
#[derive(Debug, Clone)]
pub struct TicketGenerator<R> {
    rng: R,
}

impl TicketGenerator<SimpleRng> {
    /// Reproducible generator: the same seed deals the same tickets.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl TicketGenerator<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> TicketGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate one valid ticket, retrying discarded layouts.
    pub fn generate_single_ticket(&mut self) -> Ticket {
        let mut attempt: u32 = 1;
        loop {
            match self.try_generate() {
                Ok(ticket) => {
                    if attempt > 1 {
                        debug!(attempts = attempt, "ticket generated after retries");
                    }
                    return ticket;
                }
                Err(err) => {
                    warn!(attempt, error = %err, "discarding invalid ticket layout");
                    attempt += 1;
                }
            }
        }
    }

    /// Generate `count` independent tickets.
    ///
    /// Numbers may repeat across tickets; only within a ticket are they unique.
    pub fn generate_multiple_tickets(&mut self, count: usize) -> Vec<Ticket> {
        (0..count).map(|_| self.generate_single_ticket()).collect()
    }

    /// Generate `count` tickets grouped into sheets of `per_sheet`.
    ///
    /// The last sheet may be short. A `per_sheet` of zero puts each ticket on
    /// its own sheet.
    pub fn generate_ticket_sheets(&mut self, count: usize, per_sheet: usize) -> Vec<Vec<Ticket>> {
        let tickets = self.generate_multiple_tickets(count);
        tickets
            .chunks(per_sheet.max(1))
            .map(|sheet| sheet.to_vec())
            .collect()
    }

    /// Run one generation attempt and check the result.
    pub fn try_generate(&mut self) -> Result<Ticket, TicketError> {
        let mut grid: Grid = [[None; TICKET_COLS]; TICKET_ROWS];

        for col in 0..TICKET_COLS {
            self.place_column(&mut grid, col);
        }

        self.balance_rows(&mut grid);
        sort_columns(&mut grid);

        let ticket = Ticket::from_grid(grid);
        ticket.check()?;
        Ok(ticket)
    }

    fn place_column(&mut self, grid: &mut Grid, col: usize) {
        let (min, max) = column_range(col);
        let span = (max - min + 1) as usize;
        let count = self.rng.gen_range(1..=TICKET_ROWS);

        let mut rows = [0usize, 1, 2];
        rows.shuffle(&mut self.rng);
        let picks = index::sample(&mut self.rng, span, count);

        for (&row, offset) in rows.iter().take(count).zip(picks.iter()) {
            grid[row][col] = Some(min + offset as u8);
        }
    }

    fn balance_rows(&mut self, grid: &mut Grid) {
        for row in 0..TICKET_ROWS {
            let mut filled = grid[row].iter().filter(|c| c.is_some()).count();

            while filled < NUMBERS_PER_ROW {
                let blanks: ArrayVec<usize, TICKET_COLS> =
                    (0..TICKET_COLS).filter(|&c| grid[row][c].is_none()).collect();
                let Some(&col) = blanks.choose(&mut self.rng) else {
                    break;
                };

                let (min, max) = column_range(col);
                let unused: ArrayVec<u8, 10> =
                    (min..=max).filter(|&n| !grid_contains(grid, n)).collect();
                // A column holds at most three of its ten numbers, so this never
                // comes up empty.
                let Some(&number) = unused.choose(&mut self.rng) else {
                    debug_assert!(false, "column {col} has no unused number");
                    break;
                };

                grid[row][col] = Some(number);
                filled += 1;
            }

            while filled > NUMBERS_PER_ROW {
                let numbered: ArrayVec<usize, TICKET_COLS> =
                    (0..TICKET_COLS).filter(|&c| grid[row][c].is_some()).collect();
                let Some(&col) = numbered.choose(&mut self.rng) else {
                    break;
                };
                grid[row][col] = None;
                filled -= 1;
            }
        }
    }
}

fn grid_contains(grid: &Grid, number: u8) -> bool {
    grid.iter().flatten().any(|c| *c == Some(number))
}

/// Re-sort every column's numbers ascending, keeping blank cells where they are.
fn sort_columns(grid: &mut Grid) {
    for col in 0..TICKET_COLS {
        let mut values: ArrayVec<u8, TICKET_ROWS> = grid.iter().filter_map(|r| r[col]).collect();
        values.sort_unstable();

        let mut next = values.into_iter();
        for row in grid.iter_mut() {
            if row[col].is_some() {
                row[col] = next.next();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::validate_ticket;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn generated_tickets_are_valid() {
        let mut gen = TicketGenerator::with_seed(12345);
        for _ in 0..500 {
            let ticket = gen.generate_single_ticket();
            assert!(validate_ticket(&ticket), "invalid ticket:\n{}", ticket);
            assert!(ticket.columns_sorted(), "unsorted ticket:\n{}", ticket);
        }
    }

    #[test]
    fn single_attempts_do_not_fail() {
        for seed in 0..2000 {
            let mut gen = TicketGenerator::with_seed(seed);
            assert!(gen.try_generate().is_ok(), "seed {seed}");
        }
    }

    #[test]
    fn same_seed_same_tickets() {
        let a = TicketGenerator::with_seed(42).generate_multiple_tickets(5);
        let b = TicketGenerator::with_seed(42).generate_multiple_tickets(5);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a = TicketGenerator::with_seed(1).generate_multiple_tickets(3);
        let b = TicketGenerator::with_seed(2).generate_multiple_tickets(3);
        assert_ne!(a, b);
    }

    #[test]
    fn accepts_any_rng() {
        let mut gen = TicketGenerator::new(ChaCha8Rng::seed_from_u64(7));
        let tickets = gen.generate_multiple_tickets(20);
        assert_eq!(tickets.len(), 20);
        assert!(tickets.iter().all(validate_ticket));
    }

    #[test]
    fn sheets_group_tickets() {
        let mut gen = TicketGenerator::with_seed(9);
        let sheets = gen.generate_ticket_sheets(14, 6);
        let sizes: Vec<usize> = sheets.iter().map(|s| s.len()).collect();
        assert_eq!(sizes, vec![6, 6, 2]);

        let sheets = gen.generate_ticket_sheets(3, 0);
        assert_eq!(sheets.len(), 3);

        assert!(gen.generate_ticket_sheets(0, 6).is_empty());
    }

    #[test]
    fn sort_columns_keeps_blanks_in_place() {
        let mut grid: Grid = [[None; TICKET_COLS]; TICKET_ROWS];
        grid[0][0] = Some(9);
        grid[2][0] = Some(3);
        grid[0][8] = Some(90);
        grid[1][8] = Some(81);
        grid[2][8] = Some(85);
        sort_columns(&mut grid);

        assert_eq!(grid[0][0], Some(3));
        assert_eq!(grid[1][0], None);
        assert_eq!(grid[2][0], Some(9));
        assert_eq!(
            [grid[0][8], grid[1][8], grid[2][8]],
            [Some(81), Some(85), Some(90)]
        );
    }

    #[test]
    fn balance_fills_short_rows_and_trims_long_ones() {
        let mut gen = TicketGenerator::with_seed(5);
        let mut grid: Grid = [[None; TICKET_COLS]; TICKET_ROWS];
        // Row 0 full, row 1 with two numbers, row 2 empty.
        for col in 0..TICKET_COLS {
            grid[0][col] = Some(column_range(col).0);
        }
        grid[1][0] = Some(2);
        grid[1][1] = Some(12);

        gen.balance_rows(&mut grid);
        for row in grid.iter() {
            assert_eq!(row.iter().filter(|c| c.is_some()).count(), NUMBERS_PER_ROW);
        }
    }
}
