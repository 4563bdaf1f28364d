// src/config/options.rs
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::error::{Error, Result};

/// What to do with a game that cannot be finalized (unterminated, incomplete, no winner).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedPolicy {
    /// Fail the run.
    #[default]
    Abort,
    /// Drop the game, log it and report it through `Progress`.
    Skip,
}

/// Run configuration. Every field has a default, so a TOML file only needs the
/// keys it wants to change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub events_dir: PathBuf,
    pub start_season: i32,
    pub end_season: i32,
    pub store_path: PathBuf,
    /// URL prefix or local directory holding the register shards.
    pub register_source: String,
    /// URL or local path of the Lahman `Teams.csv`.
    pub teams_source: String,
    pub schedule_url: String,
    pub coverage_boundary: i32,
    pub request_pause_ms: u64,
    /// No timeout when absent.
    pub timeout_secs: Option<u64>,
    pub malformed: MalformedPolicy,
    pub log_level: String,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            events_dir: PathBuf::from(DEFAULT_EVENTS_DIR),
            start_season: DEFAULT_START_SEASON,
            end_season: DEFAULT_END_SEASON,
            store_path: PathBuf::from(STORE_DIR).join(STORE_FILE),
            register_source: s!(REGISTER_URL),
            teams_source: s!(LAHMAN_TEAMS_URL),
            schedule_url: s!(SCHEDULE_URL),
            coverage_boundary: COVERAGE_BOUNDARY,
            request_pause_ms: REQUEST_PAUSE_MS,
            timeout_secs: None,
            malformed: MalformedPolicy::Abort,
            log_level: s!("info"),
        }
    }
}

impl AppOptions {
    /// Load from `path`, or from `retro_games.toml` in the working directory if present,
    /// else defaults. An explicit path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    return Ok(Self::default());
                }
                p
            }
        };
        let text = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let opts: AppOptions = toml::from_str(text)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        if self.start_season > self.end_season {
            return Err(Error::Config(format!(
                "start season {} is after end season {}",
                self.start_season, self.end_season
            )));
        }
        Ok(())
    }

    pub fn seasons(&self) -> RangeInclusive<i32> {
        self.start_season..=self.end_season
    }

    /// Directory holding the store file and the debug log.
    pub fn store_dir(&self) -> PathBuf {
        match self.store_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let opts = AppOptions::from_toml(
            r#"
            events_dir = "/data/retrosheet/events"
            start_season = 2010
            end_season = 2012
            malformed = "skip"
            "#,
        )
        .unwrap();
        assert_eq!(opts.events_dir, PathBuf::from("/data/retrosheet/events"));
        assert_eq!(opts.seasons(), 2010..=2012);
        assert_eq!(opts.malformed, MalformedPolicy::Skip);
        assert_eq!(opts.coverage_boundary, COVERAGE_BOUNDARY);
        assert_eq!(opts.timeout_secs, None);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = AppOptions::from_toml("start_season = 2020\nend_season = 2019\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn store_dir_follows_store_path() {
        let opts = AppOptions::default();
        assert_eq!(opts.store_dir(), PathBuf::from(STORE_DIR));

        let bare = AppOptions { store_path: PathBuf::from("games.json"), ..AppOptions::default() };
        assert_eq!(bare.store_dir(), PathBuf::from("."));
    }
}
