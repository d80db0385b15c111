//! Player ticket - a ticket together with its marks and completions

use serde::Serialize;

use crate::detector::{WinDetector, WinPattern};
use crate::marks::MarkedState;
use crate::prize::PrizeTable;
use crate::ticket::Ticket;
use crate::types::{CellPos, PatternKind};

/// Result of a mark request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkOutcome {
    Marked,
    Unmarked,
    /// Blank cell, uncalled number, or nothing to change.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct PlayerTicket {
    ticket: Ticket,
    marks: MarkedState,
    detector: WinDetector,
}

impl PlayerTicket {
    pub fn new(ticket: Ticket, prizes: PrizeTable) -> Self {
        Self {
            ticket,
            marks: MarkedState::new(),
            detector: WinDetector::new(prizes),
        }
    }

    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    pub fn marks(&self) -> &MarkedState {
        &self.marks
    }

    /// Mark `number` if it is on the ticket and not marked yet.
    pub fn auto_mark(&mut self, number: u8) -> Option<CellPos> {
        let pos = self.ticket.position_of(number)?;
        if self.marks.is_marked(pos) {
            return None;
        }
        self.marks.set(pos, true);
        Some(pos)
    }

    /// Manual mark. Only called numbers can be marked.
    pub fn mark(&mut self, pos: CellPos, called: &[u8]) -> MarkOutcome {
        let Some(number) = self.ticket.number_at(pos) else {
            return MarkOutcome::Ignored;
        };
        if !called.contains(&number) || self.marks.is_marked(pos) {
            return MarkOutcome::Ignored;
        }
        self.marks.set(pos, true);
        MarkOutcome::Marked
    }

    /// Manual toggle. Unmarking never retracts a completed pattern.
    pub fn toggle(&mut self, pos: CellPos, called: &[u8]) -> MarkOutcome {
        if self.marks.is_marked(pos) {
            self.marks.set(pos, false);
            return MarkOutcome::Unmarked;
        }
        self.mark(pos, called)
    }

    /// Newly completed patterns since the last evaluation.
    pub fn evaluate(&mut self, called: &[u8]) -> Vec<WinPattern> {
        self.detector.evaluate(&self.ticket, &self.marks, called)
    }

    pub fn completed(&self) -> &[WinPattern] {
        self.detector.completed()
    }

    pub fn has_won(&self, kind: PatternKind) -> bool {
        self.detector.is_completed(kind)
    }

    pub fn winning_pattern_at(&self, pos: CellPos) -> Option<PatternKind> {
        self.detector.winning_pattern_at(pos)
    }

    pub fn winnings(&self) -> u64 {
        self.detector.winnings()
    }

    /// Clear marks and completions; the ticket stays.
    pub fn clear(&mut self) {
        self.marks.clear();
        self.detector.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    fn player() -> PlayerTicket {
        let rows: Vec<Vec<Cell>> = vec![
            vec![Some(5), Some(12), None, Some(34), None, None, Some(61), None, Some(83)],
            vec![Some(7), None, Some(25), Some(38), None, None, Some(66), Some(72), None],
            vec![None, Some(19), Some(28), None, Some(44), Some(59), None, None, Some(90)],
        ];
        PlayerTicket::new(Ticket::from_rows(rows).unwrap(), PrizeTable::default())
    }

    #[test]
    fn auto_mark_only_hits_ticket_numbers() {
        let mut p = player();
        assert_eq!(p.auto_mark(34), Some(CellPos::new(0, 3)));
        assert_eq!(p.auto_mark(34), None);
        assert_eq!(p.auto_mark(35), None);
        assert_eq!(p.marks().marked_count(), 1);
    }

    #[test]
    fn manual_mark_requires_called_number() {
        let mut p = player();
        let pos = CellPos::new(1, 3); // 38
        assert_eq!(p.mark(pos, &[1, 2]), MarkOutcome::Ignored);
        assert_eq!(p.mark(CellPos::new(0, 2), &[38]), MarkOutcome::Ignored);
        assert_eq!(p.mark(pos, &[38]), MarkOutcome::Marked);
        assert_eq!(p.mark(pos, &[38]), MarkOutcome::Ignored);
        assert_eq!(p.toggle(pos, &[38]), MarkOutcome::Unmarked);
        assert_eq!(p.toggle(pos, &[38]), MarkOutcome::Marked);
    }

    #[test]
    fn unmarking_keeps_completions() {
        let mut p = player();
        let called = [5, 12, 34, 61, 83];
        for &n in &called {
            p.auto_mark(n);
        }
        let kinds: Vec<PatternKind> = p.evaluate(&called).iter().map(|w| w.kind).collect();
        assert_eq!(kinds, vec![PatternKind::EarlyFive, PatternKind::TopLine]);

        p.toggle(CellPos::new(0, 0), &called);
        assert!(p.evaluate(&called).is_empty());
        assert!(p.has_won(PatternKind::TopLine));
        assert_eq!(p.winnings(), 1300);

        p.clear();
        assert!(p.completed().is_empty());
        assert_eq!(p.marks().marked_count(), 0);
    }
}
