// src/runner.rs
//! Pipeline entry points shared by every frontend.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::options::{AppOptions, MalformedPolicy};
use crate::core::net::Net;
use crate::error::Result;
use crate::events::{FileGames, parse_event_file};
use crate::file;
use crate::game::Game;
use crate::players::{IdResolver, PlayerLookup, RegisterLookup};
use crate::progress::Progress;
use crate::schedule::bref::BrefSchedule;
use crate::schedule::teams::LahmanTeams;
use crate::schedule::{ScheduleSource, TeamCodeSource};
use crate::store;
use crate::walker::Pipeline;

/// What a run did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Served straight from the store; the pipeline did not run.
    pub from_store: bool,
    pub seasons: usize,
    pub files: usize,
    pub games: usize,
    pub dropped: usize,
    pub lookup_calls: usize,
    pub schedule_fetches: usize,
}

/// The production pipeline: register lookup, Baseball-Reference schedules, Lahman team codes.
pub type LivePipeline = Pipeline<RegisterLookup, BrefSchedule, LahmanTeams>;

pub fn live_pipeline(opts: &AppOptions) -> Result<LivePipeline> {
    let net = Net::new(opts.timeout_secs.map(Duration::from_secs))?;
    Ok(Pipeline::new(
        RegisterLookup::new(net.clone(), opts.register_source.clone()),
        BrefSchedule::new(net.clone(), opts.schedule_url.clone(), Duration::from_millis(opts.request_pause_ms)),
        LahmanTeams::new(net, opts.teams_source.clone()),
        opts.coverage_boundary,
        opts.malformed,
    ))
}

/// Games for the configured season range: from the store when it matches, else
/// from a full walk with `pipeline`, which then replaces the store. On a store hit the
/// pipeline's services are never called. Nothing is written on failure.
pub fn build<L, S, T>(
    opts: &AppOptions,
    force: bool,
    pipeline: &mut Pipeline<L, S, T>,
    progress: &mut dyn Progress,
) -> Result<(Vec<Game>, RunSummary)>
where
    L: PlayerLookup,
    S: ScheduleSource,
    T: TeamCodeSource,
{
    opts.validate()?;
    if !force {
        if let Some(games) = store::load(&opts.store_path, opts.start_season, opts.end_season)? {
            let summary = RunSummary { from_store: true, games: games.len(), ..RunSummary::default() };
            progress.log(&format!("Loaded {} games from {}", games.len(), opts.store_path.display()));
            progress.finish();
            return Ok((games, summary));
        }
    }
    build_with(opts, pipeline, progress)
}

/// Walk with the given services and write the store.
pub fn build_with<L, S, T>(
    opts: &AppOptions,
    pipeline: &mut Pipeline<L, S, T>,
    progress: &mut dyn Progress,
) -> Result<(Vec<Game>, RunSummary)>
where
    L: PlayerLookup,
    S: ScheduleSource,
    T: TeamCodeSource,
{
    let walked = pipeline.walk(&opts.events_dir, opts.seasons(), progress);
    progress.finish();
    let games = match walked {
        Ok(games) => games,
        Err(e) => {
            loge!("run {}-{} failed: {e}", opts.start_season, opts.end_season);
            return Err(e);
        }
    };

    store::save(&opts.store_path, opts.start_season, opts.end_season, &games)?;

    let stats = &pipeline.stats;
    let summary = RunSummary {
        from_store: false,
        seasons: stats.seasons,
        files: stats.files,
        games: stats.games,
        dropped: stats.dropped,
        lookup_calls: pipeline.resolver.calls(),
        schedule_fetches: stats.schedule_fetches,
    };
    logf!("{summary:?}");
    Ok((games, summary))
}

/// Parse one event file with identifier resolution but no schedule reconciliation.
/// Records stay at 0-0.
pub fn inspect(opts: &AppOptions, path: &Path) -> Result<FileGames> {
    let net = Net::new(opts.timeout_secs.map(Duration::from_secs))?;
    inspect_with(path, RegisterLookup::new(net, opts.register_source.clone()), opts.malformed)
}

pub fn inspect_with<L: PlayerLookup>(path: &Path, lookup: L, policy: MalformedPolicy) -> Result<FileGames> {
    let mut resolver = IdResolver::new(lookup);
    parse_event_file(path, &mut resolver, policy)
}

/// Build (or load) and write the collection as CSV.
pub fn export<L, S, T>(
    opts: &AppOptions,
    out: &Path,
    pipeline: &mut Pipeline<L, S, T>,
    progress: &mut dyn Progress,
) -> Result<(PathBuf, RunSummary)>
where
    L: PlayerLookup,
    S: ScheduleSource,
    T: TeamCodeSource,
{
    let (games, summary) = build(opts, false, pipeline, progress)?;
    file::export_games(out, &games)?;
    Ok((out.to_path_buf(), summary))
}
