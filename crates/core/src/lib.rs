//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every Tambola rule: ticket structure, ticket generation,
//! number calling, marking and win detection. It has **no dependencies** on
//! the terminal or the filesystem, so:
//!
//! - **Deterministic**: the same seed deals the same tickets and calls the
//!   same numbers
//! - **Testable**: randomness and time are injected
//! - **Portable**: runs in the terminal game, the ticket printer, or headless
//!
//! # Module Structure
//!
//! - [`ticket`]: 3x9 ticket model and validation
//! - [`generator`]: random tickets that always validate
//! - [`caller`]: draws 1-90 without replacement, with subscribers and stats
//! - [`marks`] / [`player`]: marked cells and manual/auto marking
//! - [`detector`]: Early Five, the three lines, and Full House
//! - [`prize`]: amounts paid per pattern
//! - [`session`]: one game, orchestrating all of the above
//! - [`rng`] / [`clock`]: injectable randomness and time
//!
//! # Game Rules
//!
//! - A ticket has 3 rows and 9 columns; each row holds exactly 5 numbers.
//! - Column `c` holds numbers from `c*10+1` to `c*10+10` (`1-10`, `11-20`, ..., `81-90`).
//! - Numbers 1-90 are called in random order, each exactly once.
//! - A pattern completes the first time it is satisfied and is reported once.
//!
//! # Example
//!
//! ```
//! use tambola_core::{GameSession, SessionOptions};
//!
//! let mut session = GameSession::with_seed(12345, SessionOptions::default());
//!
//! let mut wins = 0;
//! while let Some(outcome) = session.draw() {
//!     wins += outcome.wins.len();
//! }
//!
//! // Auto-marking completes all five patterns on each of the three tickets.
//! assert_eq!(wins, 15);
//! assert!(!session.is_active());
//! ```

pub mod caller;
pub mod clock;
pub mod detector;
pub mod error;
pub mod generator;
pub mod marks;
pub mod player;
pub mod prize;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod ticket;

pub use tambola_types as types;

// Re-export commonly used types for convenience
pub use caller::{CalledBand, CallerState, GameStats, NumberCall, NumberCaller, SubscriptionId};
pub use clock::{Clock, StepClock, SystemClock};
pub use detector::{satisfied_patterns, WinDetector, WinPattern};
pub use error::{SessionError, TicketError};
pub use generator::TicketGenerator;
pub use marks::MarkedState;
pub use player::{MarkOutcome, PlayerTicket};
pub use prize::PrizeTable;
pub use rng::SimpleRng;
pub use session::{DrawOutcome, GameEvent, GameSession, SessionOptions, TicketWin};
pub use snapshot::{SessionSnapshot, TicketSnapshot};
pub use ticket::{validate_grid, validate_ticket, Ticket};
