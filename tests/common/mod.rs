// tests/common/mod.rs
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use retro_games::Result;
use retro_games::players::PlayerLookup;
use retro_games::schedule::{Outcome, ScheduleRow, ScheduleSource, TeamCodeSource};

/// Hands out 1, 2, 3, ... in first-seen order and remembers every request.
#[derive(Default)]
pub struct CountingLookup {
    pub requests: Vec<Vec<String>>,
    next: u32,
    known: HashMap<String, u32>,
}

impl PlayerLookup for CountingLookup {
    fn reverse_lookup(&mut self, ids: &[String]) -> Result<HashMap<String, u32>> {
        self.requests.push(ids.to_vec());
        let mut out = HashMap::new();
        for id in ids {
            let next = &mut self.next;
            let fg = *self.known.entry(id.clone()).or_insert_with(|| {
                *next += 1;
                *next
            });
            out.insert(id.clone(), fg);
        }
        Ok(out)
    }
}

/// Schedule tables keyed by (season, schedule code). Unknown teams get an empty table.
#[derive(Default)]
pub struct FakeSchedules {
    pub tables: HashMap<(i32, String), Vec<ScheduleRow>>,
    pub fetched: Vec<(i32, String)>,
}

impl FakeSchedules {
    pub fn add(&mut self, season: i32, team: &str, rows: &[(u32, u32, u8, Outcome, u32, u32)]) {
        let rows = rows
            .iter()
            .map(|&(m, d, game_in_day, outcome, wins, losses)| ScheduleRow {
                date: NaiveDate::from_ymd_opt(season, m, d).unwrap(),
                game_in_day,
                outcome,
                wins,
                losses,
            })
            .collect();
        self.tables.insert((season, team.to_string()), rows);
    }
}

impl ScheduleSource for FakeSchedules {
    fn fetch_schedule(&mut self, season: i32, team: &str) -> Result<Vec<ScheduleRow>> {
        self.fetched.push((season, team.to_string()));
        Ok(self.tables.get(&(season, team.to_string())).cloned().unwrap_or_default())
    }
}

/// Identity mapping except the Yankees, who are `NYA` in the logs and `NYY` on schedule pages.
#[derive(Default)]
pub struct FakeCodes {
    pub requested: Vec<i32>,
}

impl TeamCodeSource for FakeCodes {
    fn team_codes(&mut self, season: i32) -> Result<HashMap<String, String>> {
        self.requested.push(season);
        Ok(["BAL", "BOS", "CLE"]
            .into_iter()
            .map(|t| (t.to_string(), t.to_string()))
            .chain([("NYA".to_string(), "NYY".to_string())])
            .collect())
    }
}

/// Player ids for one team: batter n (1-8) plays position n+1, a DH bats ninth,
/// the starter does not bat.
pub fn batter(team: &str, n: u8) -> String {
    format!("{}b{n}", team.to_ascii_lowercase())
}

pub fn starter(team: &str) -> String {
    format!("{}p", team.to_ascii_lowercase())
}

/// One game in event-file form. `extra` lines go after the starters.
pub fn game_text(id: &str, date: &str, number: u8, vis: &str, home: &str, wp: &str, extra: &[&str]) -> String {
    let mut out = format!(
        "id,{id}\nversion,2\ninfo,visteam,{vis}\ninfo,hometeam,{home}\ninfo,site,XXX01\n\
         info,date,{date}\ninfo,number,{number}\ninfo,wp,{wp}\ninfo,lp,\n"
    );
    for (side, team) in [(0, vis), (1, home)] {
        for n in 1..=8u8 {
            out.push_str(&format!("start,{},\"Player {n}\",{side},{n},{}\n", batter(team, n), n + 1));
        }
        out.push_str(&format!("start,{}dh,\"Designated\",{side},9,10\n", team.to_ascii_lowercase()));
        out.push_str(&format!("start,{},\"Starter\",{side},0,1\n", starter(team)));
    }
    out.push_str(&format!("play,1,0,{},00,,S8\n", batter(vis, 1)));
    out.push_str("com,\"a comment, with a comma\"\n");
    for line in extra {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&format!("data,er,{},0\n", starter(home)));
    out
}

pub fn write(dir: &Path, name: &str, games: &[String]) {
    fs::write(dir.join(name), games.concat()).unwrap();
}
