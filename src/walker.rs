// src/walker.rs
//! Directory walk: seasons ascending, files in name order, lines in file order.
//!
//! The identifier cache and the team-code cache live in [`Pipeline`] and persist
//! across the whole walk. Schedule tables are cached per season only.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::options::MalformedPolicy;
use crate::error::{Error, Result};
use crate::events::parse_event_file;
use crate::game::Game;
use crate::players::{IdResolver, PlayerLookup};
use crate::progress::Progress;
use crate::schedule::{ScheduleSource, SeasonSchedules, TeamCodeSource, TeamCodes};

/// Event files for `season` directly under `dir`: names starting with the year.
pub fn season_files(dir: &Path, season: i32) -> Result<Vec<PathBuf>> {
    let prefix = season.to_string();
    let mut out = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with(&prefix) {
            out.push(entry.into_path());
        }
    }
    Ok(out)
}

/// Counters for one walk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub seasons: usize,
    pub files: usize,
    pub games: usize,
    pub dropped: usize,
    pub schedule_fetches: usize,
}

/// The services and run-scoped caches a walk needs.
pub struct Pipeline<L, S, T> {
    pub resolver: IdResolver<L>,
    pub schedules: S,
    pub team_codes: TeamCodes<T>,
    pub policy: MalformedPolicy,
    pub stats: WalkStats,
}

impl<L: PlayerLookup, S: ScheduleSource, T: TeamCodeSource> Pipeline<L, S, T> {
    pub fn new(lookup: L, schedules: S, team_codes: T, coverage_boundary: i32, policy: MalformedPolicy) -> Self {
        Self {
            resolver: IdResolver::new(lookup),
            schedules,
            team_codes: TeamCodes::new(team_codes, coverage_boundary),
            policy,
            stats: WalkStats::default(),
        }
    }

    /// Every season in `seasons`, accumulated in order. Stops at the first fatal error.
    pub fn walk(
        &mut self,
        dir: &Path,
        seasons: RangeInclusive<i32>,
        progress: &mut dyn Progress,
    ) -> Result<Vec<Game>> {
        if !dir.is_dir() {
            return Err(Error::Config(format!("events directory {} not found", dir.display())));
        }
        progress.begin(seasons.clone().count());

        let mut all = Vec::new();
        for season in seasons {
            let games = self.run_season(dir, season, progress)?;
            logf!("Season {season}: {} games", games.len());
            all.extend(games);
        }
        Ok(all)
    }

    /// Parse every file of one season, then reconcile the season's games in one pass.
    pub fn run_season(
        &mut self,
        dir: &Path,
        season: i32,
        progress: &mut dyn Progress,
    ) -> Result<Vec<Game>> {
        let files = season_files(dir, season)?;
        if files.is_empty() {
            logw!("no event files for {season} in {}", dir.display());
        }
        progress.season_start(season, files.len());

        let mut games = Vec::new();
        for path in &files {
            let parsed = parse_event_file(path, &mut self.resolver, self.policy)?;
            for d in &parsed.dropped {
                progress.game_dropped(&d.game_id, &d.problem);
            }
            progress.file_done(path, parsed.games.len());
            self.stats.files += 1;
            self.stats.dropped += parsed.dropped.len();
            games.extend(parsed.games);
        }

        let mut book = SeasonSchedules::new(season, &mut self.schedules, &mut self.team_codes);
        book.reconcile(&mut games)?;
        self.stats.schedule_fetches += book.fetches();

        self.stats.seasons += 1;
        self.stats.games += games.len();
        Ok(games)
    }
}
