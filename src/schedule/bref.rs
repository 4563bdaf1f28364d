// src/schedule/bref.rs
use std::thread;
use std::time::{Duration, Instant};

use super::{ScheduleRow, ScheduleSource};
use crate::core::net::{Net, is_remote};
use crate::error::Result;
use crate::specs::schedule;

/// Baseball-Reference schedule pages. `base` is the `/teams` URL prefix, or a
/// local directory holding saved `<TEAM>/<SEASON>-schedule-scores.shtml` pages.
pub struct BrefSchedule {
    net: Net,
    base: String,
    pause: Duration,
    last_fetch: Option<Instant>,
}

impl BrefSchedule {
    pub fn new(net: Net, base: impl Into<String>, pause: Duration) -> Self {
        Self { net, base: base.into(), pause, last_fetch: None }
    }

    pub fn page_location(&self, season: i32, team: &str) -> String {
        let base = self.base.trim_end_matches(['/', '\\']);
        format!("{base}/{team}/{season}-schedule-scores.shtml")
    }

    /// Space out remote requests; local pages are read back to back.
    fn wait_turn(&mut self) {
        if !is_remote(&self.base) {
            return;
        }
        if let Some(last) = self.last_fetch {
            let since = last.elapsed();
            if since < self.pause {
                thread::sleep(self.pause - since);
            }
        }
        self.last_fetch = Some(Instant::now());
    }
}

impl ScheduleSource for BrefSchedule {
    fn fetch_schedule(&mut self, season: i32, team: &str) -> Result<Vec<ScheduleRow>> {
        self.wait_turn();
        let location = self.page_location(season, team);
        let doc = self.net.read_source(&location)?;
        let t = Instant::now();
        let rows = schedule::parse_doc(&doc, season)?;
        logd!("Schedule: parsed {team} {season} ({} rows) in {:?}", rows.len(), t.elapsed());
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_urls() {
        let src = BrefSchedule::new(Net::new(None).unwrap(), "https://www.baseball-reference.com/teams/", Duration::ZERO);
        assert_eq!(
            src.page_location(2004, "NYY"),
            "https://www.baseball-reference.com/teams/NYY/2004-schedule-scores.shtml"
        );
    }

    #[test]
    fn reads_saved_pages_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("BAL")).unwrap();
        std::fs::write(
            dir.path().join("BAL/2003-schedule-scores.shtml"),
            r#"<table id="team_schedule"><tr><td data-stat="date_game">Monday, Mar 31</td><td data-stat="win_loss_result">W</td><td data-stat="win_loss_record">1-0</td></tr></table>"#,
        )
        .unwrap();
        let mut src = BrefSchedule::new(Net::new(None).unwrap(), dir.path().to_string_lossy(), Duration::from_secs(60));
        let rows = src.fetch_schedule(2003, "BAL").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!((rows[0].wins, rows[0].losses), (1, 0));
    }
}
