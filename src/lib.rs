// src/lib.rs
// #![allow(dead_code)]

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod events;
pub mod file;
pub mod game;
pub mod players;
pub mod progress;
pub mod runner;
pub mod schedule;
pub mod store;
pub mod walker;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::{Error, Result};
pub use game::{Game, Side};
