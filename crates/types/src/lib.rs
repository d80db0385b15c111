//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are pure data with no game logic, making them usable in any
//! context (ticket generation, calling, win detection, terminal rendering).
//!
//! # Ticket Dimensions
//!
//! A Tambola ticket is a fixed grid:
//!
//! - **Rows**: 3 (indexed 0-2, top to bottom)
//! - **Columns**: 9 (indexed 0-8, left to right)
//! - **Numbers per row**: exactly 5, so 15 numbers per ticket
//!
//! # Column Ranges
//!
//! Column `c` holds numbers from its decade:
//!
//! | Column | Range |
//! |--------|-------|
//! | 0 | 1-10 |
//! | 1 | 11-20 |
//! | ... | ... |
//! | 7 | 71-80 |
//! | 8 | 81-90 |
//!
//! # Call Bands
//!
//! Called numbers are grouped for display into five bands of eighteen
//! (`1-18`, `19-36`, `37-54`, `55-72`, `73-90`). These bands have nothing to do
//! with the column ranges above.
//!
//! # Examples
//!
//! ```
//! use tambola_types::{column_range, column_for_number, PatternKind, TICKET_COLS};
//!
//! assert_eq!(column_range(0), (1, 10));
//! assert_eq!(column_range(TICKET_COLS - 1), (81, 90));
//! assert_eq!(column_for_number(90), Some(8));
//!
//! let kind = PatternKind::from_str("top-line").unwrap();
//! assert_eq!(kind, PatternKind::TopLine);
//! assert_eq!(kind.row(), Some(0));
//! ```

use serde::{Deserialize, Serialize};

/// Ticket rows (3)
pub const TICKET_ROWS: usize = 3;

/// Ticket columns (9)
pub const TICKET_COLS: usize = 9;

/// Filled cells per row (5)
pub const NUMBERS_PER_ROW: usize = 5;

/// Smallest callable number
pub const MIN_NUMBER: u8 = 1;

/// Largest callable number (size of the pool)
pub const MAX_NUMBER: u8 = 90;

/// Marks needed for the Early Five prize
pub const EARLY_FIVE_COUNT: usize = 5;

/// Display bands over called numbers (inclusive bounds).
pub const CALL_BANDS: [(u8, u8); 5] = [(1, 18), (19, 36), (37, 54), (55, 72), (73, 90)];

/// Upper bound on tickets held by one player.
pub const MAX_TICKETS: usize = 10;

/// Tickets dealt when nothing else is configured.
pub const DEFAULT_TICKET_COUNT: usize = 3;

/// Tickets per printed sheet.
pub const DEFAULT_TICKETS_PER_SHEET: usize = 6;

/// Length of the "recent calls" strip.
pub const DEFAULT_RECENT_CALLS: usize = 5;

/// Countdown before the next automatic call (6 seconds).
pub const AUTO_CALL_COUNTDOWN_MS: u32 = 6000;

/// Default entry fee used when sizing a prize pool.
pub const DEFAULT_ENTRY_FEE: u32 = 50;

/// A ticket cell
///
/// - `None`: blank cell
/// - `Some(n)`: cell holding number `n` in `1..=90`
pub type Cell = Option<u8>;

/// Inclusive number range of a ticket column.
///
/// Columns past the last one are clamped to the final column (`81-90`).
///
/// ```
/// use tambola_types::column_range;
///
/// assert_eq!(column_range(3), (31, 40));
/// assert_eq!(column_range(8), (81, 90));
/// ```
pub fn column_range(col: usize) -> (u8, u8) {
    let col = col.min(TICKET_COLS - 1) as u8;
    let min = col * 10 + 1;
    let max = (col * 10 + 10).min(MAX_NUMBER);
    (min, max)
}

/// Column a number belongs to, or `None` when outside `1..=90`.
pub fn column_for_number(n: u8) -> Option<usize> {
    if !(MIN_NUMBER..=MAX_NUMBER).contains(&n) {
        return None;
    }
    Some((((n - 1) / 10) as usize).min(TICKET_COLS - 1))
}

/// Index of the call band containing `n`, or `None` when outside `1..=90`.
pub fn band_for_number(n: u8) -> Option<usize> {
    CALL_BANDS
        .iter()
        .position(|&(lo, hi)| (lo..=hi).contains(&n))
}

/// Position of a cell on a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Whether the position lies on a 3x9 ticket.
    pub fn in_bounds(&self) -> bool {
        self.row < TICKET_ROWS && self.col < TICKET_COLS
    }
}

/// Prize patterns a ticket can complete
///
/// - **EarlyFive**: any five cells marked
/// - **TopLine / MiddleLine / BottomLine**: every number of one row marked
/// - **FullHouse**: every number on the ticket marked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternKind {
    EarlyFive,
    TopLine,
    MiddleLine,
    BottomLine,
    FullHouse,
}

impl PatternKind {
    /// All patterns in reporting order.
    pub const ALL: [PatternKind; 5] = [
        PatternKind::EarlyFive,
        PatternKind::TopLine,
        PatternKind::MiddleLine,
        PatternKind::BottomLine,
        PatternKind::FullHouse,
    ];

    /// Parse a pattern from its wire name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tambola_types::PatternKind;
    ///
    /// assert_eq!(PatternKind::from_str("early-five"), Some(PatternKind::EarlyFive));
    /// assert_eq!(PatternKind::from_str("FULL-HOUSE"), Some(PatternKind::FullHouse));
    /// assert_eq!(PatternKind::from_str("corners"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "early-five" => Some(PatternKind::EarlyFive),
            "top-line" => Some(PatternKind::TopLine),
            "middle-line" => Some(PatternKind::MiddleLine),
            "bottom-line" => Some(PatternKind::BottomLine),
            "full-house" => Some(PatternKind::FullHouse),
            _ => None,
        }
    }

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::EarlyFive => "early-five",
            PatternKind::TopLine => "top-line",
            PatternKind::MiddleLine => "middle-line",
            PatternKind::BottomLine => "bottom-line",
            PatternKind::FullHouse => "full-house",
        }
    }

    /// Player-facing name
    pub fn display_name(&self) -> &'static str {
        match self {
            PatternKind::EarlyFive => "Early Five",
            PatternKind::TopLine => "Top Line",
            PatternKind::MiddleLine => "Middle Line",
            PatternKind::BottomLine => "Bottom Line",
            PatternKind::FullHouse => "Full House",
        }
    }

    /// Line pattern for a row (0 = top).
    pub fn line(row: usize) -> Option<Self> {
        match row {
            0 => Some(PatternKind::TopLine),
            1 => Some(PatternKind::MiddleLine),
            2 => Some(PatternKind::BottomLine),
            _ => None,
        }
    }

    /// Row covered by a line pattern; `None` for non-line patterns.
    pub fn row(&self) -> Option<usize> {
        match self {
            PatternKind::TopLine => Some(0),
            PatternKind::MiddleLine => Some(1),
            PatternKind::BottomLine => Some(2),
            PatternKind::EarlyFive | PatternKind::FullHouse => None,
        }
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How tickets are marked when a number is called
///
/// - **Assist**: every ticket holding the called number is marked automatically
/// - **Manual**: the player marks cells; only called numbers may be marked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkMode {
    #[default]
    Assist,
    Manual,
}

impl MarkMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "assist" | "auto" => Some(MarkMode::Assist),
            "manual" => Some(MarkMode::Manual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarkMode::Assist => "assist",
            MarkMode::Manual => "manual",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            MarkMode::Assist => MarkMode::Manual,
            MarkMode::Manual => MarkMode::Assist,
        }
    }

    pub fn auto_marks(&self) -> bool {
        matches!(self, MarkMode::Assist)
    }
}

/// Player actions in the interactive game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Call the next number
    Draw,
    /// Start over with the same tickets
    Reset,
    /// Deal a fresh set of tickets and start over
    NewTickets,
    /// Toggle the automatic call countdown
    ToggleAutoCall,
    /// Switch between assist and manual marking
    ToggleMarkMode,
    /// Move the cell cursor
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Select the next / previous ticket
    NextTicket,
    PrevTicket,
    /// Mark (or unmark) the cell under the cursor
    Mark,
    /// Buy one more ticket
    AddTicket,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tambola_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("draw"), Some(GameAction::Draw));
    /// assert_eq!(GameAction::from_str("toggleAutoCall"), Some(GameAction::ToggleAutoCall));
    /// assert_eq!(GameAction::from_str("spin"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draw" => Some(GameAction::Draw),
            "reset" => Some(GameAction::Reset),
            "newtickets" => Some(GameAction::NewTickets),
            "toggleautocall" => Some(GameAction::ToggleAutoCall),
            "togglemarkmode" => Some(GameAction::ToggleMarkMode),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "moveup" => Some(GameAction::MoveUp),
            "movedown" => Some(GameAction::MoveDown),
            "nextticket" => Some(GameAction::NextTicket),
            "prevticket" => Some(GameAction::PrevTicket),
            "mark" => Some(GameAction::Mark),
            "addticket" => Some(GameAction::AddTicket),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Draw => "draw",
            GameAction::Reset => "reset",
            GameAction::NewTickets => "newTickets",
            GameAction::ToggleAutoCall => "toggleAutoCall",
            GameAction::ToggleMarkMode => "toggleMarkMode",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveUp => "moveUp",
            GameAction::MoveDown => "moveDown",
            GameAction::NextTicket => "nextTicket",
            GameAction::PrevTicket => "prevTicket",
            GameAction::Mark => "mark",
            GameAction::AddTicket => "addTicket",
        }
    }
}
