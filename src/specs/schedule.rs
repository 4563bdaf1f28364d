// src/specs/schedule.rs
//! Baseball-Reference team schedule page (`/teams/XXX/YYYY-schedule-scores.shtml`).
//!
//! Rows are located by `data-stat` attribute, not by column position:
//! - `date_game`: `"Sunday, Jul 4"` or `"Sunday, Jul 4 (2)"` for doubleheader legs
//! - `win_loss_result`: `W`, `L`, `W-wo`, `L-wo`, `T`
//! - `win_loss_record`: `"45-40"` after the game
//!
//! Header rows (the `<thead>` row and the `<tr class="thead">` repeats inside the body)
//! and unplayed games are skipped. A row counts as played only when its result cell holds
//! a W/L/T marker.

use chrono::NaiveDate;

use crate::core::html::{cell_text_by_attr, next_tag_block_ci, to_lower};
use crate::core::sanitize::leading_digits;
use crate::error::{Error, Result};
use crate::schedule::{Outcome, ScheduleRow};

const MONTHS: [&str; 12] = ["jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec"];

pub fn parse_doc(html_doc: &str, season: i32) -> Result<Vec<ScheduleRow>> {
    let body = schedule_table(html_doc);
    let lc = to_lower(body);

    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((tr_s, tr_e)) = next_tag_block_ci(body, &lc, "<tr", "</tr>", pos) {
        let tr = &body[tr_s..tr_e];
        pos = tr_e;
        if is_header_row(&lc[tr_s..tr_e]) {
            continue;
        }

        let Some(date_text) = cell_text_by_attr(tr, "data-stat", "date_game") else { continue };
        let result = cell_text_by_attr(tr, "data-stat", "win_loss_result").unwrap_or_default();
        let record = cell_text_by_attr(tr, "data-stat", "win_loss_record").unwrap_or_default();
        if !is_result_marker(&result) || record.is_empty() {
            continue; // not played yet, or a header without the usual markup
        }

        let (date, game_in_day) = parse_schedule_date(&date_text, season)
            .ok_or_else(|| Error::Source(format!("unreadable schedule date {date_text:?}")))?;
        let (wins, losses) = parse_record(&record)
            .ok_or_else(|| Error::Source(format!("unreadable record {record:?} on {date_text}")))?;

        out.push(ScheduleRow { date, game_in_day, outcome: Outcome::from_marker(&result), wins, losses });
    }
    Ok(out)
}

/// `tr_lc` is one lowercased `<tr>` block.
fn is_header_row(tr_lc: &str) -> bool {
    let open = tr_lc.find('>').map_or(tr_lc, |e| &tr_lc[..e]);
    open.contains("thead") || tr_lc.contains(r#"scope="col""#)
}

/// `W`, `L`, `T`, optionally suffixed (`W-wo`). Header text such as `W/L` is not.
fn is_result_marker(s: &str) -> bool {
    matches!(s.trim().split('-').next(), Some("W" | "L" | "T"))
}

/// Narrow to the `team_schedule` table when present; whole document otherwise.
fn schedule_table(doc: &str) -> &str {
    let lc = to_lower(doc);
    let Some(id_at) = lc.find(r#"id="team_schedule""#) else { return doc };
    let start = lc[..id_at].rfind("<table").unwrap_or(id_at);
    let end = lc[id_at..].find("</table>").map(|e| id_at + e + "</table>".len()).unwrap_or(doc.len());
    &doc[start..end]
}

/// `"Sunday, Jul 4 (2)"` → (2004-07-04, 2). Weekday is ignored.
pub fn parse_schedule_date(text: &str, season: i32) -> Option<(NaiveDate, u8)> {
    let text = text.trim();
    let (body, game_in_day) = match text.rfind('(') {
        Some(open) => {
            let n = text[open + 1..].trim_end_matches(')').trim().parse::<u8>().ok()?;
            (text[..open].trim(), n)
        }
        None => (text, 0),
    };
    let month_day = body.split_once(',').map(|(_, md)| md).unwrap_or(body).trim();
    let (month, day) = month_day.split_once(' ')?;
    let month_lc = month.to_ascii_lowercase();
    let month = MONTHS.iter().position(|m| month_lc.starts_with(m))? as u32 + 1;
    let day = leading_digits(day)?.parse::<u32>().ok()?;
    Some((NaiveDate::from_ymd_opt(season, month, day)?, game_in_day))
}

/// `"45-40"` (optionally `"45-40-1"`) → (45, 40).
pub fn parse_record(text: &str) -> Option<(u32, u32)> {
    let mut parts = text.trim().split('-');
    let wins = parts.next()?.trim().parse().ok()?;
    let losses = parts.next()?.trim().parse().ok()?;
    Some((wins, losses))
}
