// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

use crate::game::MalformedGame;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Store encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{}:{line}: {reason} in {text:?}", path.display())]
    MalformedLine {
        path: PathBuf,
        line: usize,
        text: String,
        reason: String,
    },

    /// The lookup service had no target id for these players.
    #[error("Game {game_id}: no player id mapping for {}", ids.join(", "))]
    UnresolvedPlayers { game_id: String, ids: Vec<String> },

    #[error("No {team} {season} schedule row for {date} (game {game_number})")]
    ScheduleRowNotFound {
        team: String,
        season: i32,
        date: String,
        game_number: u8,
    },

    #[error("Game {game_id}: {problem}")]
    MalformedGame {
        game_id: String,
        problem: MalformedGame,
    },

    /// An external table could not be interpreted (missing column, bad record string, ...).
    #[error("Source error: {0}")]
    Source(String),
}
