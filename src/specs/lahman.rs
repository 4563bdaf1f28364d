// src/specs/lahman.rs
//! Lahman `Teams.csv` → per-season team code cross-reference rows.

use crate::core::csv::{column_index, parse_rows};
use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TeamRow {
    pub season: i32,
    /// Retrosheet code (`teamIDretro`), as used in event logs.
    pub retro: String,
    /// Baseball-Reference code (`teamIDBR`), as used by schedule pages.
    pub bref: String,
}

pub fn parse(text: &str) -> Result<Vec<TeamRow>> {
    let mut rows = parse_rows(text, ',').into_iter();
    let headers = rows.next().ok_or_else(|| Error::Source(s!("empty teams table")))?;
    let year_ix = column_index(&headers, "yearID")?;
    let retro_ix = column_index(&headers, "teamIDretro")?;
    let bref_ix = column_index(&headers, "teamIDBR")?;

    let mut out = Vec::new();
    for row in rows {
        let cell = |i: usize| row.get(i).map(|s| s.trim()).unwrap_or("");
        let Ok(season) = cell(year_ix).parse::<i32>() else { continue };
        let (retro, bref) = (cell(retro_ix), cell(bref_ix));
        if retro.is_empty() || bref.is_empty() {
            continue;
        }
        out.push(TeamRow { season, retro: retro.to_string(), bref: bref.to_string() });
    }
    Ok(out)
}
