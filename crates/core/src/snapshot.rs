use serde::Serialize;

use crate::caller::{CalledBand, GameStats};
use crate::marks::MarkedState;
use crate::player::PlayerTicket;
use crate::ticket::Ticket;
use crate::types::{CellPos, MarkMode, PatternKind, TICKET_COLS, TICKET_ROWS};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketSnapshot {
    pub ticket: Ticket,
    pub marks: MarkedState,
    /// Completed pattern covering each cell, if any.
    pub winning: [[Option<PatternKind>; TICKET_COLS]; TICKET_ROWS],
    /// Completed patterns in completion order.
    pub completed: Vec<PatternKind>,
    pub winnings: u64,
}

impl From<&PlayerTicket> for TicketSnapshot {
    fn from(player: &PlayerTicket) -> Self {
        let mut winning = [[None; TICKET_COLS]; TICKET_ROWS];
        for (row, cells) in winning.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = player.winning_pattern_at(CellPos::new(row, col));
            }
        }
        Self {
            ticket: player.ticket().clone(),
            marks: *player.marks(),
            winning,
            completed: player.completed().iter().map(|p| p.kind).collect(),
            winnings: player.winnings(),
        }
    }
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub tickets: Vec<TicketSnapshot>,
    /// Called numbers in call order.
    pub called: Vec<u8>,
    pub current: Option<u8>,
    /// Most recent first.
    pub recent: Vec<u8>,
    pub bands: [CalledBand; 5],
    pub stats: GameStats,
    pub mark_mode: MarkMode,
    pub is_active: bool,
}

impl SessionSnapshot {
    pub fn is_called(&self, number: u8) -> bool {
        self.called.contains(&number)
    }

    pub fn total_winnings(&self) -> u64 {
        self.tickets.iter().map(|t| t.winnings).sum()
    }
}
