//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play. It avoids widget toolkits and
//! renders into a framebuffer that is diffed and flushed through `crossterm`.
//!
//! - [`fb`]: framebuffer and styles
//! - [`game_view`]: pure mapping from a session snapshot to a framebuffer
//! - [`renderer`]: terminal setup and diff flushing
//! - [`announce`]: calling phrases for each number

pub mod announce;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tambola_core as core;
pub use tambola_types as types;

pub use announce::announcement;
pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{pattern_code, GameView, HudStatus, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
