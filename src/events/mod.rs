// src/events/mod.rs
//! Retrosheet event files.
//!
//! - `classify`: one raw line → one typed [`EventLine`].
//! - `assembly`: the per-game state machine.
//! - `parse`: drives both over a file.

pub mod assembly;
pub mod classify;
pub mod parse;

pub use assembly::{Assembler, Dropped};
pub use classify::{EventLine, classify};
pub use parse::{FileGames, parse_event_file, parse_events};
