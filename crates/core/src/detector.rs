//! Win detector - which prize patterns a ticket has completed
//!
//! [`satisfied_patterns`] is a pure function of the ticket, its marks and the
//! call order. [`WinDetector`] wraps it with the per-ticket completion set:
//! a pattern is reported once, the first time it becomes satisfied, and stays
//! completed for the rest of the game even if marks are later removed.
//!
//! Patterns:
//! - **Early Five**: at least five marked numbers anywhere. The five cells
//!   attached to the pattern are the first five marked numbers in call order.
//! - **Lines**: every number of the row is marked. A row without numbers never
//!   completes.
//! - **Full House**: every number on the ticket is marked.

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::marks::MarkedState;
use crate::prize::PrizeTable;
use crate::ticket::Ticket;
use crate::types::{CellPos, PatternKind, EARLY_FIVE_COUNT, TICKET_COLS, TICKET_ROWS};

/// Cells attached to a pattern (for highlighting).
pub type PatternCells = ArrayVec<CellPos, { TICKET_ROWS * TICKET_COLS }>;

/// A satisfied prize pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinPattern {
    pub kind: PatternKind,
    pub cells: PatternCells,
    pub prize: u32,
}

impl WinPattern {
    pub fn contains(&self, pos: CellPos) -> bool {
        self.cells.contains(&pos)
    }
}

/// Every pattern currently satisfied, in [`PatternKind::ALL`] order.
pub fn satisfied_patterns(
    ticket: &Ticket,
    marked: &MarkedState,
    called: &[u8],
    prizes: &PrizeTable,
) -> Vec<WinPattern> {
    let mut patterns = Vec::new();

    let mut marked_numbers = marked.marked_numbers(ticket);
    if marked_numbers.len() >= EARLY_FIVE_COUNT {
        // Numbers missing from `called` sort last; the sort is stable.
        marked_numbers.sort_by_key(|(n, _)| {
            called
                .iter()
                .position(|c| c == n)
                .unwrap_or(usize::MAX)
        });
        patterns.push(WinPattern {
            kind: PatternKind::EarlyFive,
            cells: marked_numbers
                .iter()
                .take(EARLY_FIVE_COUNT)
                .map(|&(_, pos)| pos)
                .collect(),
            prize: prizes.amount(PatternKind::EarlyFive),
        });
    }

    for row in 0..TICKET_ROWS {
        let cells = ticket.row_cells(row);
        if cells.is_empty() || !cells.iter().all(|&pos| marked.is_marked(pos)) {
            continue;
        }
        let Some(kind) = PatternKind::line(row) else {
            continue;
        };
        patterns.push(WinPattern {
            kind,
            cells: cells.iter().copied().collect(),
            prize: prizes.amount(kind),
        });
    }

    let all: PatternCells = (0..TICKET_ROWS)
        .flat_map(|row| ticket.row_cells(row))
        .collect();
    if !all.is_empty() && all.iter().all(|&pos| marked.is_marked(pos)) {
        patterns.push(WinPattern {
            kind: PatternKind::FullHouse,
            cells: all,
            prize: prizes.amount(PatternKind::FullHouse),
        });
    }

    patterns
}

/// Per-ticket completion tracking
#[derive(Debug, Clone, Default)]
pub struct WinDetector {
    prizes: PrizeTable,
    completed: Vec<WinPattern>,
}

impl WinDetector {
    pub fn new(prizes: PrizeTable) -> Self {
        Self {
            prizes,
            completed: Vec::new(),
        }
    }

    /// Re-check the ticket and return the patterns completed by this update.
    ///
    /// Patterns that complete together are returned together.
    pub fn evaluate(
        &mut self,
        ticket: &Ticket,
        marked: &MarkedState,
        called: &[u8],
    ) -> Vec<WinPattern> {
        let fresh: Vec<WinPattern> = satisfied_patterns(ticket, marked, called, &self.prizes)
            .into_iter()
            .filter(|p| !self.is_completed(p.kind))
            .collect();
        self.completed.extend(fresh.iter().cloned());
        fresh
    }

    /// Completed patterns, in completion order.
    pub fn completed(&self) -> &[WinPattern] {
        &self.completed
    }

    pub fn is_completed(&self, kind: PatternKind) -> bool {
        self.completed.iter().any(|p| p.kind == kind)
    }

    /// First completed pattern covering `pos`, if any.
    pub fn winning_pattern_at(&self, pos: CellPos) -> Option<PatternKind> {
        self.completed
            .iter()
            .find(|p| p.contains(pos))
            .map(|p| p.kind)
    }

    pub fn prizes(&self) -> &PrizeTable {
        &self.prizes
    }

    /// Sum of prizes won on this ticket.
    pub fn winnings(&self) -> u64 {
        self.completed.iter().map(|p| p.prize as u64).sum()
    }

    /// Forget completions (new game).
    pub fn reset(&mut self) {
        self.completed.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn ticket() -> Ticket {
        let rows: Vec<Vec<Cell>> = vec![
            vec![Some(5), Some(12), None, Some(34), None, None, Some(61), None, Some(83)],
            vec![Some(7), None, Some(25), Some(38), None, None, Some(66), Some(72), None],
            vec![None, Some(19), Some(28), None, Some(44), Some(59), None, None, Some(90)],
        ];
        Ticket::from_rows(rows).unwrap()
    }

    fn mark_numbers(ticket: &Ticket, numbers: &[u8]) -> MarkedState {
        let mut marks = MarkedState::new();
        for &n in numbers {
            marks.set(ticket.position_of(n).unwrap(), true);
        }
        marks
    }

    #[test]
    fn nothing_marked_nothing_satisfied() {
        let t = ticket();
        let patterns = satisfied_patterns(&t, &MarkedState::new(), &[], &PrizeTable::default());
        assert!(patterns.is_empty());
    }

    #[test]
    fn early_five_cells_follow_call_order() {
        let t = ticket();
        let called = [90, 7, 44, 5, 25, 66];
        let marks = mark_numbers(&t, &called);
        let patterns = satisfied_patterns(&t, &marks, &called, &PrizeTable::default());

        assert_eq!(patterns.len(), 1);
        let early = &patterns[0];
        assert_eq!(early.kind, PatternKind::EarlyFive);
        assert_eq!(early.prize, 500);
        let expected: Vec<CellPos> = [90, 7, 44, 5, 25]
            .iter()
            .map(|&n| t.position_of(n).unwrap())
            .collect();
        assert_eq!(early.cells.as_slice(), expected.as_slice());
    }

    #[test]
    fn four_marks_is_not_early_five() {
        let t = ticket();
        let called = [5, 12, 34, 61];
        let marks = mark_numbers(&t, &called);
        assert!(satisfied_patterns(&t, &marks, &called, &PrizeTable::default()).is_empty());
    }

    #[test]
    fn uncalled_marks_sort_last() {
        let t = ticket();
        let marks = mark_numbers(&t, &[5, 7, 25, 38, 66, 90]);
        let called = [90, 66, 38, 25, 7];
        let patterns = satisfied_patterns(&t, &marks, &called, &PrizeTable::default());
        let early = patterns.iter().find(|p| p.kind == PatternKind::EarlyFive).unwrap();
        assert!(!early.contains(t.position_of(5).unwrap()));
    }

    #[test]
    fn detector_reports_each_pattern_once() {
        let t = ticket();
        let mut detector = WinDetector::default();
        let mut called = vec![5, 12, 34, 61];
        let marks = mark_numbers(&t, &called);
        assert!(detector.evaluate(&t, &marks, &called).is_empty());

        called.push(83);
        let marks = mark_numbers(&t, &called);
        let kinds: Vec<PatternKind> = detector
            .evaluate(&t, &marks, &called)
            .iter()
            .map(|p| p.kind)
            .collect();
        assert_eq!(kinds, vec![PatternKind::EarlyFive, PatternKind::TopLine]);

        called.push(7);
        let marks = mark_numbers(&t, &called);
        assert!(detector.evaluate(&t, &marks, &called).is_empty());
        assert_eq!(detector.completed().len(), 2);
        assert_eq!(detector.winnings(), 1300);
    }

    #[test]
    fn completion_survives_unmarking() {
        let t = ticket();
        let mut detector = WinDetector::default();
        let called = [5, 12, 34, 61, 83];
        let marks = mark_numbers(&t, &called);
        assert_eq!(detector.evaluate(&t, &marks, &called).len(), 2);

        let fewer = mark_numbers(&t, &called[..3]);
        assert!(detector.evaluate(&t, &fewer, &called).is_empty());
        assert!(detector.is_completed(PatternKind::TopLine));
        // Early Five completed first and covers the same cells.
        assert_eq!(
            detector.winning_pattern_at(t.position_of(83).unwrap()),
            Some(PatternKind::EarlyFive)
        );
        assert_eq!(detector.winning_pattern_at(t.position_of(7).unwrap()), None);

        detector.reset();
        assert!(detector.completed().is_empty());
    }

    #[test]
    fn blank_row_never_completes_a_line() {
        let mut grid = [[None; TICKET_COLS]; TICKET_ROWS];
        grid[0][0] = Some(1);
        let t = Ticket::from_grid(grid);
        let mut marks = MarkedState::new();
        marks.set(CellPos::new(0, 0), true);

        let kinds: Vec<PatternKind> = satisfied_patterns(&t, &marks, &[1], &PrizeTable::default())
            .iter()
            .map(|p| p.kind)
            .collect();
        assert_eq!(kinds, vec![PatternKind::TopLine, PatternKind::FullHouse]);
    }
}
