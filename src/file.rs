// src/file.rs

use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::Path,
};

use crate::core::csv::write_row;
use crate::error::Result;
use crate::game::{DEFENSE_NAMES, Game, LINEUP_SLOTS, Side};

/// Column order of the games export.
pub fn export_headers() -> Vec<String> {
    let mut h: Vec<String> = ["game_id", "year", "month", "day", "game_number", "home_team", "away_team"]
        .into_iter()
        .map(String::from)
        .collect();
    h.extend(["home_wins", "home_losses", "away_wins", "away_losses"].map(String::from));
    for side in [Side::Home, Side::Away] {
        h.extend((1..=LINEUP_SLOTS).map(|n| format!("{side}_batter_{n}")));
        h.extend(DEFENSE_NAMES.iter().map(|pos| format!("{side}_{pos}")));
        h.push(format!("{side}_SP"));
    }
    h.push(s!("home_win"));
    h
}

pub fn game_row(g: &Game) -> Vec<String> {
    let mut r = vec![
        g.game_id.clone(),
        g.year.to_string(),
        g.month.to_string(),
        g.day.to_string(),
        g.game_number.to_string(),
        g.home_team.clone(),
        g.away_team.clone(),
    ];
    r.extend([g.home_wins, g.home_losses, g.away_wins, g.away_losses].map(|n| n.to_string()));
    for (lineup, defense, starter) in [
        (&g.home_lineup, &g.home_defense, g.home_starter),
        (&g.away_lineup, &g.away_defense, g.away_starter),
    ] {
        r.extend(lineup.iter().map(u32::to_string));
        r.extend(defense.iter().map(u32::to_string));
        r.push(starter.to_string());
    }
    r.push(u8::from(g.home_win).to_string());
    r
}

/// Write `games` as one CSV with a header row. Parent directories are created.
pub fn export_games(path: &Path, games: &[Game]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    let mut w = BufWriter::new(File::create(path)?);
    write_row(&mut w, &export_headers(), ',')?;
    for g in games {
        write_row(&mut w, &game_row(g), ',')?;
    }
    w.flush()?;
    logf!("Exported {} games to {}", games.len(), path.display());
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}
