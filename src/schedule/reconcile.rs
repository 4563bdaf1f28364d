// src/schedule/reconcile.rs
use std::collections::HashMap;

use chrono::NaiveDate;

use super::{Outcome, ScheduleSource, ScheduleTable, TeamCodeSource, TeamCodes};
use crate::error::{Error, Result};
use crate::game::{Game, Side};

/// Schedule tables for one season, keyed by event-log team code.
/// Built fresh per season and dropped when the season is reconciled.
pub struct SeasonSchedules<'a, S, T> {
    season: i32,
    source: &'a mut S,
    codes: &'a mut TeamCodes<T>,
    tables: HashMap<String, ScheduleTable>,
    fetches: usize,
}

impl<'a, S: ScheduleSource, T: TeamCodeSource> SeasonSchedules<'a, S, T> {
    pub fn new(season: i32, source: &'a mut S, codes: &'a mut TeamCodes<T>) -> Self {
        Self { season, source, codes, tables: HashMap::new(), fetches: 0 }
    }

    /// Number of schedule tables fetched so far this season.
    pub fn fetches(&self) -> usize {
        self.fetches
    }

    fn table(&mut self, team: &str) -> Result<&ScheduleTable> {
        if !self.tables.contains_key(team) {
            let code = self.codes.schedule_code(self.season, team)?;
            let rows = self.source.fetch_schedule(self.season, &code)?;
            self.fetches += 1;
            logf!("Schedule {team} ({code}) {}: {} games", self.season, rows.len());
            self.tables.insert(team.to_string(), ScheduleTable::new(rows));
        }
        Ok(&self.tables[team])
    }

    /// `team`'s record going into the game on `date`, plus that game's outcome.
    pub fn record_before(&mut self, team: &str, date: NaiveDate, game_number: u8) -> Result<(u32, u32, Outcome)> {
        let season = self.season;
        let row = self.table(team)?.find(date, game_number).ok_or_else(|| Error::ScheduleRowNotFound {
            team: team.to_string(),
            season,
            date: date.format("%A, %b %-d").to_string(),
            game_number,
        })?;
        let (wins, losses) = row.record_before()?;
        Ok((wins, losses, row.outcome))
    }

    /// Fill in both teams' pre-game records for every game.
    pub fn reconcile(&mut self, games: &mut [Game]) -> Result<()> {
        for game in games.iter_mut() {
            let date = game.date().ok_or_else(|| Error::Source(format!("{}: invalid date", game.game_id)))?;
            for side in Side::BOTH {
                let team = game.team(side).to_string();
                let (wins, losses, outcome) = self.record_before(&team, date, game.game_number)?;
                game.set_record(side, wins, losses);

                let won = game.winner() == side;
                if (outcome == Outcome::Win) != won && outcome != Outcome::Tie {
                    logw!("{}: schedule says {team} {outcome:?}, event log says {side} won={won}", game.game_id);
                }
            }
        }
        Ok(())
    }
}
