// src/game.rs
//! Game records.
//!
//! A game lives in two shapes:
//! - [`GameDraft`] while the event log is being read: source-system (Retrosheet) ids,
//!   slots may still be empty.
//! - [`Game`] once finalized: every slot holds a resolved target-system (FanGraphs) id.
//!   Records are filled in later by the schedule reconciler.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

pub const LINEUP_SLOTS: usize = 9;
pub const DEFENSE_SLOTS: usize = 8;

/// Defensive slot names, in slot order (field position 2..=9).
pub const DEFENSE_NAMES: [&str; DEFENSE_SLOTS] = ["C", "1B", "2B", "3B", "SS", "LF", "CF", "RF"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Away,
    Home,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Away, Side::Home];

    fn index(self) -> usize {
        match self {
            Side::Away => 0,
            Side::Home => 1,
        }
    }
}

/// Retrosheet side flag: `0` visiting, `1` home.
impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Side::Away),
            "1" => Ok(Side::Home),
            other => Err(format!("bad side flag {other:?}")),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Away => "away",
            Side::Home => "home",
        })
    }
}

/// Finalized game. Immutable apart from the four record counts, which the
/// schedule reconciler fills in after assembly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    /// 0 = only game that day, 1/2 = doubleheader legs.
    pub game_number: u8,

    pub home_team: String,
    pub away_team: String,

    /// Records as of this date, not counting this game.
    pub home_wins: u32,
    pub home_losses: u32,
    pub away_wins: u32,
    pub away_losses: u32,

    pub home_lineup: [u32; LINEUP_SLOTS],
    pub away_lineup: [u32; LINEUP_SLOTS],
    pub home_defense: [u32; DEFENSE_SLOTS],
    pub away_defense: [u32; DEFENSE_SLOTS],
    pub home_starter: u32,
    pub away_starter: u32,

    pub home_win: bool,
}

impl Game {
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn away_win(&self) -> bool {
        !self.home_win
    }

    pub fn winner(&self) -> Side {
        if self.home_win { Side::Home } else { Side::Away }
    }

    pub fn team(&self, side: Side) -> &str {
        match side {
            Side::Away => &self.away_team,
            Side::Home => &self.home_team,
        }
    }

    pub fn set_record(&mut self, side: Side, wins: u32, losses: u32) {
        match side {
            Side::Away => {
                self.away_wins = wins;
                self.away_losses = losses;
            }
            Side::Home => {
                self.home_wins = wins;
                self.home_losses = losses;
            }
        }
    }

    pub fn record(&self, side: Side) -> (u32, u32) {
        match side {
            Side::Away => (self.away_wins, self.away_losses),
            Side::Home => (self.home_wins, self.home_losses),
        }
    }

    /// All 36 player slots: lineups, defense, starters.
    pub fn player_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.home_lineup
            .iter()
            .chain(&self.away_lineup)
            .chain(&self.home_defense)
            .chain(&self.away_defense)
            .chain([&self.home_starter, &self.away_starter])
            .copied()
    }

    /// True when no slot still holds the 0 placeholder.
    pub fn is_resolved(&self) -> bool {
        self.player_ids().all(|id| id != 0)
    }
}

/// Why a game could not be finalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MalformedGame {
    /// A new game started (or the file ended) before the end-of-game marker.
    Unterminated,
    /// A lineup/defense/starter slot was never filled.
    Incomplete { side: Side, slot: String },
    /// Date or team info line missing.
    MissingInfo(&'static str),
    /// No pitcher of record, or it never appeared on a start/sub line.
    NoWinner,
}

impl fmt::Display for MalformedGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedGame::Unterminated => write!(f, "no end-of-game marker"),
            MalformedGame::Incomplete { side, slot } => write!(f, "{side} {slot} never filled"),
            MalformedGame::MissingInfo(what) => write!(f, "missing {what} info"),
            MalformedGame::NoWinner => write!(f, "winning side could not be determined"),
        }
    }
}

/// One side's starting assignment in source ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Roster {
    pub lineup: [Option<String>; LINEUP_SLOTS],
    pub defense: [Option<String>; DEFENSE_SLOTS],
    pub starter: Option<String>,
}

impl Roster {
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.lineup
            .iter()
            .chain(&self.defense)
            .chain(std::iter::once(&self.starter))
            .filter_map(|slot| slot.as_deref())
    }

    /// Name of the first unfilled slot, if any.
    pub fn missing_slot(&self) -> Option<String> {
        if let Some(i) = self.lineup.iter().position(Option::is_none) {
            return Some(format!("batting slot {}", i + 1));
        }
        if let Some(i) = self.defense.iter().position(Option::is_none) {
            return Some(format!("{} slot", DEFENSE_NAMES[i]));
        }
        if self.starter.is_none() {
            return Some(s!("starting pitcher"));
        }
        None
    }
}

/// Map every slot through `resolve`, collecting the ids it could not map.
fn resolve_slots<const N: usize>(
    slots: &[Option<String>; N],
    resolve: &impl Fn(&str) -> Option<u32>,
    missing: &mut Vec<String>,
) -> [u32; N] {
    let mut out = [0u32; N];
    for (dst, slot) in out.iter_mut().zip(slots) {
        if let Some(id) = slot {
            match resolve(id) {
                Some(target) => *dst = target,
                None => missing.push(id.clone()),
            }
        }
    }
    out
}

/// The game being assembled from the log.
#[derive(Clone, Debug, Default)]
pub struct GameDraft {
    pub game_id: String,
    pub date: Option<NaiveDate>,
    pub game_number: u8,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    rosters: [Roster; 2],
    pub winner: Option<Side>,
}

impl GameDraft {
    pub fn new(game_id: &str) -> Self {
        Self { game_id: game_id.to_string(), ..Default::default() }
    }

    pub fn roster(&self, side: Side) -> &Roster {
        &self.rosters[side.index()]
    }

    pub fn roster_mut(&mut self, side: Side) -> &mut Roster {
        &mut self.rosters[side.index()]
    }

    /// Completeness check run before any id lookup is spent on the game.
    pub fn check(&self) -> Result<(), MalformedGame> {
        if self.date.is_none() {
            return Err(MalformedGame::MissingInfo("date"));
        }
        if self.home_team.is_none() {
            return Err(MalformedGame::MissingInfo("home team"));
        }
        if self.away_team.is_none() {
            return Err(MalformedGame::MissingInfo("visiting team"));
        }
        for side in Side::BOTH {
            if let Some(slot) = self.roster(side).missing_slot() {
                return Err(MalformedGame::Incomplete { side, slot });
            }
        }
        if self.winner.is_none() {
            return Err(MalformedGame::NoWinner);
        }
        Ok(())
    }

    /// Distinct source ids referenced by either roster.
    pub fn source_ids(&self) -> BTreeSet<&str> {
        Side::BOTH.iter().flat_map(|&side| self.roster(side).ids()).collect()
    }

    /// Rewrite every slot into target ids. `Err` carries the ids `resolve` did not know.
    /// Call [`GameDraft::check`] first; unchecked gaps come out as 0.
    pub fn resolve(&self, resolve: impl Fn(&str) -> Option<u32>) -> Result<Game, Vec<String>> {
        let mut missing = Vec::new();
        let home = self.roster(Side::Home);
        let away = self.roster(Side::Away);

        let home_lineup = resolve_slots(&home.lineup, &resolve, &mut missing);
        let away_lineup = resolve_slots(&away.lineup, &resolve, &mut missing);
        let home_defense = resolve_slots(&home.defense, &resolve, &mut missing);
        let away_defense = resolve_slots(&away.defense, &resolve, &mut missing);
        let [home_starter] = resolve_slots(std::array::from_ref(&home.starter), &resolve, &mut missing);
        let [away_starter] = resolve_slots(std::array::from_ref(&away.starter), &resolve, &mut missing);

        if !missing.is_empty() {
            missing.sort();
            missing.dedup();
            return Err(missing);
        }

        let date = self.date.unwrap_or_default();
        Ok(Game {
            game_id: self.game_id.clone(),
            year: date.year(),
            month: date.month(),
            day: date.day(),
            game_number: self.game_number,
            home_team: self.home_team.clone().unwrap_or_default(),
            away_team: self.away_team.clone().unwrap_or_default(),
            home_wins: 0,
            home_losses: 0,
            away_wins: 0,
            away_losses: 0,
            home_lineup,
            away_lineup,
            home_defense,
            away_defense,
            home_starter,
            away_starter,
            home_win: self.winner == Some(Side::Home),
        })
    }
}
