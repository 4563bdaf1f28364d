// src/cli.rs
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};

use crate::config::options::{AppOptions, MalformedPolicy};
use crate::game::MalformedGame;
use crate::progress::Progress;
use crate::runner::{self, RunSummary};

#[derive(Parser)]
#[command(name = "retro_games")]
#[command(about = "Retrosheet event logs to resolved per-game records", long_about = None)]
struct Cli {
    /// Config file (default: retro_games.toml if present)
    #[arg(short, long, env = "RETRO_GAMES_CONFIG")]
    config: Option<PathBuf>,

    /// Directory holding the season event files
    #[arg(long)]
    events_dir: Option<PathBuf>,

    /// Store file for the resolved games
    #[arg(long)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the season range from the store, or rebuild it from the event logs
    Build {
        #[arg(long)]
        start: Option<i32>,
        #[arg(long)]
        end: Option<i32>,
        /// Ignore a matching store and rebuild
        #[arg(long)]
        force: bool,
        /// Drop malformed games instead of failing the run
        #[arg(long)]
        skip_malformed: bool,
    },
    /// Parse a single event file and print its games (no schedule lookups)
    Inspect {
        file: PathBuf,
    },
    /// Write the season range as CSV, building it first if needed
    Export {
        #[arg(long)]
        start: Option<i32>,
        #[arg(long)]
        end: Option<i32>,
        #[arg(short, long)]
        out: PathBuf,
    },
}

/// Status lines on stderr.
struct StderrProgress {
    seasons: usize,
    done: usize,
}

impl Progress for StderrProgress {
    fn begin(&mut self, seasons: usize) {
        self.seasons = seasons;
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn season_start(&mut self, season: i32, files: usize) {
        self.done += 1;
        eprintln!("[{}/{}] {season}: {files} files", self.done, self.seasons);
    }

    fn file_done(&mut self, path: &Path, games: usize) {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        eprintln!("    {name}: {games} games");
    }

    fn game_dropped(&mut self, game_id: &str, problem: &MalformedGame) {
        eprintln!("    dropped {game_id}: {problem}");
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut opts = AppOptions::load(cli.config.as_deref())?;
    if let Some(dir) = cli.events_dir {
        opts.events_dir = dir;
    }
    if let Some(store) = cli.store {
        opts.store_path = store;
    }
    if let Err(e) = crate::log::init(&opts.log_level, &opts.store_dir()) {
        eprintln!("logging disabled: {e}");
    }

    let mut progress = StderrProgress { seasons: 0, done: 0 };
    match cli.command {
        Commands::Build { start, end, force, skip_malformed } => {
            apply_range(&mut opts, start, end);
            if skip_malformed {
                opts.malformed = MalformedPolicy::Skip;
            }
            let mut pipeline = runner::live_pipeline(&opts)?;
            let (_, summary) = runner::build(&opts, force, &mut pipeline, &mut progress)
                .wrap_err_with(|| format!("building {}-{}", opts.start_season, opts.end_season))?;
            print_summary(&opts, &summary);
        }
        Commands::Inspect { file } => {
            let parsed = runner::inspect(&opts, &file).wrap_err_with(|| format!("inspecting {}", file.display()))?;
            for g in &parsed.games {
                println!("{}", serde_json::to_string(g)?);
            }
            for d in &parsed.dropped {
                eprintln!("dropped {}: {}", d.game_id, d.problem);
            }
        }
        Commands::Export { start, end, out } => {
            apply_range(&mut opts, start, end);
            let mut pipeline = runner::live_pipeline(&opts)?;
            let (path, summary) = runner::export(&opts, &out, &mut pipeline, &mut progress)
                .wrap_err_with(|| format!("exporting to {}", out.display()))?;
            print_summary(&opts, &summary);
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

fn apply_range(opts: &mut AppOptions, start: Option<i32>, end: Option<i32>) {
    if let Some(s) = start {
        opts.start_season = s;
    }
    if let Some(e) = end {
        opts.end_season = e;
    }
}

fn print_summary(opts: &AppOptions, s: &RunSummary) {
    if s.from_store {
        println!("{} games from {} (store hit)", s.games, opts.store_path.display());
        return;
    }
    println!(
        "{} seasons, {} files, {} games ({} dropped); {} id lookups, {} schedule fetches",
        s.seasons, s.files, s.games, s.dropped, s.lookup_calls, s.schedule_fetches
    );
}
