// src/schedule/teams.rs
//! Team-code cross-reference: event-log (Retrosheet) codes → schedule-page codes.
//!
//! The Lahman table only reaches `coverage_boundary`; later seasons reuse the
//! boundary season's mapping, and a code missing from the mapping is used as-is.

use std::collections::HashMap;

use super::TeamCodeSource;
use crate::core::net::Net;
use crate::error::Result;
use crate::specs::lahman::{self, TeamRow};

/// Run-scoped cache over a [`TeamCodeSource`]: one fetch per covered season.
pub struct TeamCodes<T> {
    source: T,
    boundary: i32,
    by_season: HashMap<i32, HashMap<String, String>>,
}

impl<T: TeamCodeSource> TeamCodes<T> {
    pub fn new(source: T, boundary: i32) -> Self {
        Self { source, boundary, by_season: HashMap::new() }
    }

    /// Schedule-source code for `code` in `season`.
    pub fn schedule_code(&mut self, season: i32, code: &str) -> Result<String> {
        let covered = season.min(self.boundary);
        if !self.by_season.contains_key(&covered) {
            let map = self.source.team_codes(covered)?;
            logd!("team codes: {} mappings for {covered}", map.len());
            self.by_season.insert(covered, map);
        }
        match self.by_season.get(&covered).and_then(|m| m.get(code)) {
            Some(mapped) => Ok(mapped.clone()),
            None => {
                logw!("no schedule code for {code} in {covered}; using it unchanged");
                Ok(code.to_string())
            }
        }
    }

    pub fn source(&self) -> &T {
        &self.source
    }
}

/// Lahman `Teams.csv`, read once per run from a URL or local path.
pub struct LahmanTeams {
    net: Net,
    location: String,
    rows: Option<Vec<TeamRow>>,
}

impl LahmanTeams {
    pub fn new(net: Net, location: impl Into<String>) -> Self {
        Self { net, location: location.into(), rows: None }
    }

    fn rows(&mut self) -> Result<&[TeamRow]> {
        if self.rows.is_none() {
            let text = self.net.read_source(&self.location)?;
            let rows = lahman::parse(&text)?;
            logf!("Loaded {} team-season rows from {}", rows.len(), self.location);
            self.rows = Some(rows);
        }
        Ok(self.rows.as_deref().unwrap_or_default())
    }
}

impl TeamCodeSource for LahmanTeams {
    fn team_codes(&mut self, season: i32) -> Result<HashMap<String, String>> {
        Ok(self
            .rows()?
            .iter()
            .filter(|r| r.season == season)
            .map(|r| (r.retro.clone(), r.bref.clone()))
            .collect())
    }
}
