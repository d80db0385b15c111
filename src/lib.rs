//! Tambola (workspace facade crate).
//!
//! Re-exports the workspace crates under short names and holds the pieces
//! shared by the binaries: environment configuration, the event log and the
//! auto-call countdown.

pub mod auto_call;
pub mod config;
pub mod event_log;

pub use tambola_core as core;
pub use tambola_input as input;
pub use tambola_term as term;
pub use tambola_types as types;

pub use auto_call::AutoCall;
pub use config::GameConfig;
pub use event_log::EventLog;
