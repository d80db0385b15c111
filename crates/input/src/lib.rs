//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and tracks the
//! cell cursor used for manual marking. Nothing here touches game state.

pub mod cursor;
pub mod map;

pub use tambola_types as types;

pub use cursor::TicketCursor;
pub use map::{handle_key_event, should_quit};
