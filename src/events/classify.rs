// src/events/classify.rs
//! Event-line classifier.
//!
//! Pure function from one raw log line to one typed [`EventLine`]. Lines are split
//! into comma-delimited fields and validated; nothing is read by character offset.
//! Lines whose tag this pipeline does not use come back as [`EventLine::Ignored`].

use chrono::NaiveDate;

use crate::core::csv::split_record;
use crate::game::{LINEUP_SLOTS, Side};

/// A recognised line whose fields do not validate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineFault(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldPosition {
    Pitcher,
    /// Defensive slot index: catcher = 0 … right field = 7.
    Fielder(usize),
    /// 10 and above (DH, pinch hitter, pinch runner). Takes no defensive slot.
    Other(u8),
}

impl FieldPosition {
    fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => None,
            1 => Some(FieldPosition::Pitcher),
            2..=9 => Some(FieldPosition::Fielder(usize::from(code - 2))),
            _ => Some(FieldPosition::Other(code)),
        }
    }
}

/// A `start` line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Appearance {
    pub player: String,
    pub side: Side,
    /// 1-based batting order, `None` when not batting (code 0).
    pub batting: Option<u8>,
    pub position: FieldPosition,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventLine {
    /// `id,<game id>`
    GameStart(String),
    /// `info,date,YYYY/MM/DD`
    Date(NaiveDate),
    /// `info,number,N`
    GameNumber(u8),
    /// `info,wp,<player>`; empty when no decision was recorded.
    WinningPitcher(Option<String>),
    /// `info,visteam,<team>`
    VisitingTeam(String),
    /// `info,hometeam,<team>`
    HomeTeam(String),
    /// `start,<player>,"name",side,batting,position`
    Start(Appearance),
    /// `sub,<player>,"name",side,...`; only the side matters here.
    Sub { player: String, side: Side },
    /// Any `data` line.
    EndOfGame,
    Ignored,
}

const TAGS: [&str; 5] = ["id", "info", "start", "sub", "data"];

pub fn classify(line: &str) -> Result<EventLine, LineFault> {
    let line = line.trim_end_matches(['\r', '\n']);
    // cheap tag check first: most lines are `play`/`com`
    let tag = line.split(',').next().unwrap_or("");
    if !TAGS.contains(&tag) {
        return Ok(EventLine::Ignored);
    }

    let fields = split_record(line, ',');
    let field = |i: usize| fields.get(i).map(|f| f.trim()).unwrap_or("");

    match tag {
        "id" => {
            let id = field(1);
            if id.is_empty() { fault!("game start without id"); }
            Ok(EventLine::GameStart(id.to_string()))
        }
        "info" => classify_info(field(1), field(2)),
        "start" => {
            if fields.len() < 6 { fault!("start line needs 6 fields, found {}", fields.len()); }
            Ok(EventLine::Start(Appearance {
                player: player_id(field(1))?,
                side: side(field(3))?,
                batting: batting_order(field(4))?,
                position: field_position(field(5))?,
            }))
        }
        "sub" => {
            if fields.len() < 4 { fault!("sub line needs at least 4 fields, found {}", fields.len()); }
            Ok(EventLine::Sub { player: player_id(field(1))?, side: side(field(3))? })
        }
        "data" => Ok(EventLine::EndOfGame),
        _ => Ok(EventLine::Ignored),
    }
}

fn classify_info(key: &str, value: &str) -> Result<EventLine, LineFault> {
    match key {
        "date" => match NaiveDate::parse_from_str(value, "%Y/%m/%d") {
            Ok(d) => Ok(EventLine::Date(d)),
            Err(e) => fault!("bad date {value:?}: {e}"),
        },
        "number" => match value.parse::<u8>() {
            Ok(n) if n <= 9 => Ok(EventLine::GameNumber(n)),
            _ => fault!("bad game number {value:?}"),
        },
        "wp" => Ok(EventLine::WinningPitcher((!value.is_empty()).then(|| value.to_string()))),
        "visteam" => Ok(EventLine::VisitingTeam(team_code(value)?)),
        "hometeam" => Ok(EventLine::HomeTeam(team_code(value)?)),
        _ => Ok(EventLine::Ignored),
    }
}

fn player_id(s: &str) -> Result<String, LineFault> {
    if s.is_empty() || s.contains(char::is_whitespace) {
        fault!("bad player id {s:?}");
    }
    Ok(s.to_string())
}

fn team_code(s: &str) -> Result<String, LineFault> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric()) {
        fault!("bad team code {s:?}");
    }
    Ok(s.to_string())
}

fn side(s: &str) -> Result<Side, LineFault> {
    s.parse::<Side>().map_err(LineFault)
}

fn batting_order(s: &str) -> Result<Option<u8>, LineFault> {
    match s.parse::<u8>() {
        Ok(0) => Ok(None),
        Ok(n) if usize::from(n) <= LINEUP_SLOTS => Ok(Some(n)),
        _ => fault!("bad batting order {s:?}"),
    }
}

fn field_position(s: &str) -> Result<FieldPosition, LineFault> {
    match s.parse::<u8>().ok().and_then(FieldPosition::from_code) {
        Some(pos) => Ok(pos),
        None => fault!("bad field position {s:?}"),
    }
}
