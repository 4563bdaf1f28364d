// src/schedule/mod.rs
//! Schedule reconciliation: cumulative team records per game date.
//!
//! - `teams`: Retrosheet → schedule-source team code cross-reference (run-scoped cache).
//! - `bref`: the schedule-page source.
//! - `reconcile`: per-season table cache and the record back-out.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::error::{Error, Result};

pub mod bref;
pub mod reconcile;
pub mod teams;

pub use reconcile::SeasonSchedules;
pub use teams::TeamCodes;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    /// Ties and anything else: neither count moves.
    Tie,
}

impl Outcome {
    /// `W`, `W-wo` → win; `L`, `L-wo` → loss.
    pub fn from_marker(s: &str) -> Self {
        match s.trim().chars().next() {
            Some('W') | Some('w') => Outcome::Win,
            Some('L') | Some('l') => Outcome::Loss,
            _ => Outcome::Tie,
        }
    }
}

/// One completed game in a team's season schedule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleRow {
    pub date: NaiveDate,
    /// 0 = single game, 1/2 = doubleheader leg from the `(n)` date suffix.
    pub game_in_day: u8,
    pub outcome: Outcome,
    /// Record after this game.
    pub wins: u32,
    pub losses: u32,
}

impl ScheduleRow {
    /// Record going into this game: the post-game record minus this game's own result.
    pub fn record_before(&self) -> Result<(u32, u32)> {
        let bad = || Error::Source(format!("{} record {}-{} cannot follow a {:?}", self.date, self.wins, self.losses, self.outcome));
        match self.outcome {
            Outcome::Win => Ok((self.wins.checked_sub(1).ok_or_else(bad)?, self.losses)),
            Outcome::Loss => Ok((self.wins, self.losses.checked_sub(1).ok_or_else(bad)?)),
            Outcome::Tie => Ok((self.wins, self.losses)),
        }
    }
}

/// One team's season, indexed by (date, game in day).
#[derive(Clone, Debug, Default)]
pub struct ScheduleTable {
    rows: HashMap<(NaiveDate, u8), ScheduleRow>,
}

impl ScheduleTable {
    pub fn new(rows: Vec<ScheduleRow>) -> Self {
        let mut by_key = HashMap::with_capacity(rows.len());
        for row in rows {
            // keep the first listing if a page repeats a row
            by_key.entry((row.date, row.game_in_day)).or_insert(row);
        }
        Self { rows: by_key }
    }

    /// Exact (date, game number) match. No fallback between single games and
    /// doubleheader legs.
    pub fn find(&self, date: NaiveDate, game_number: u8) -> Option<&ScheduleRow> {
        self.rows.get(&(date, game_number))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Per-team season schedule provider.
pub trait ScheduleSource {
    /// `team` is already in the source's own code space.
    fn fetch_schedule(&mut self, season: i32, team: &str) -> Result<Vec<ScheduleRow>>;
}

/// Source → schedule team code mapping for a season.
pub trait TeamCodeSource {
    fn team_codes(&mut self, season: i32) -> Result<HashMap<String, String>>;
}
