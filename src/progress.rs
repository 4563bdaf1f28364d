// src/progress.rs
use std::path::Path;

use crate::game::MalformedGame;

/// Progress reporting for the directory walk.
/// Frontends implement this to surface status to users; every hook defaults to a no-op.
pub trait Progress {
    /// Called at the start with the number of seasons to walk.
    fn begin(&mut self, _seasons: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// A season's files have been enumerated.
    fn season_start(&mut self, _season: i32, _files: usize) {}

    /// One event file has been parsed.
    fn file_done(&mut self, _path: &Path, _games: usize) {}

    /// A game was dropped under the `skip` policy.
    fn game_dropped(&mut self, _game_id: &str, _problem: &MalformedGame) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
