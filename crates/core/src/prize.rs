//! Prize module - amounts paid per completed pattern
//!
//! Two ways to size prizes:
//! - Fixed amounts (the default): Early Five 500, each line 800, Full House 2500
//! - A share of the pool collected from entry fees: Full House 50%, each line
//!   15%, Early Five 5%. Shares are floored to whole units.

use serde::Serialize;

use crate::types::PatternKind;

/// Fixed prize for Early Five
pub const EARLY_FIVE_PRIZE: u32 = 500;
/// Fixed prize for each line
pub const LINE_PRIZE: u32 = 800;
/// Fixed prize for Full House
pub const FULL_HOUSE_PRIZE: u32 = 2500;

/// Pool share per pattern, in percent.
pub fn pool_share_percent(kind: PatternKind) -> u32 {
    match kind {
        PatternKind::EarlyFive => 5,
        PatternKind::TopLine | PatternKind::MiddleLine | PatternKind::BottomLine => 15,
        PatternKind::FullHouse => 50,
    }
}

/// Amount paid per pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrizeTable {
    amounts: [u32; 5],
}

impl PrizeTable {
    pub fn new(
        early_five: u32,
        top_line: u32,
        middle_line: u32,
        bottom_line: u32,
        full_house: u32,
    ) -> Self {
        Self {
            amounts: [early_five, top_line, middle_line, bottom_line, full_house],
        }
    }

    /// Split `entry_fee * players` by the pool shares.
    pub fn from_pool(entry_fee: u32, players: u32) -> Self {
        let pool = entry_fee as u64 * players as u64;
        let share = |kind: PatternKind| -> u32 {
            let amount = pool * pool_share_percent(kind) as u64 / 100;
            amount.min(u32::MAX as u64) as u32
        };
        Self {
            amounts: PatternKind::ALL.map(share),
        }
    }

    pub fn amount(&self, kind: PatternKind) -> u32 {
        self.amounts[index_of(kind)]
    }

    /// Sum of every prize on offer.
    pub fn total(&self) -> u64 {
        self.amounts.iter().map(|&a| a as u64).sum()
    }
}

impl Default for PrizeTable {
    fn default() -> Self {
        Self::new(
            EARLY_FIVE_PRIZE,
            LINE_PRIZE,
            LINE_PRIZE,
            LINE_PRIZE,
            FULL_HOUSE_PRIZE,
        )
    }
}

fn index_of(kind: PatternKind) -> usize {
    match kind {
        PatternKind::EarlyFive => 0,
        PatternKind::TopLine => 1,
        PatternKind::MiddleLine => 2,
        PatternKind::BottomLine => 3,
        PatternKind::FullHouse => 4,
    }
}
