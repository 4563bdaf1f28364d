// src/specs/register.rs
//! Chadwick register shard → `(key_retro, key_fangraphs)` pairs.
//! People without either key are skipped.

use crate::core::csv::{column_index, parse_rows};
use crate::error::{Error, Result};

pub fn parse(text: &str) -> Result<Vec<(String, u32)>> {
    let mut rows = parse_rows(text, ',').into_iter();
    let headers = rows.next().ok_or_else(|| Error::Source(s!("empty register shard")))?;
    let retro_ix = column_index(&headers, "key_retro")?;
    let fg_ix = column_index(&headers, "key_fangraphs")?;

    let mut out = Vec::new();
    for row in rows {
        let retro = row.get(retro_ix).map(|s| s.trim()).unwrap_or("");
        let fg = row.get(fg_ix).map(|s| s.trim()).unwrap_or("");
        if retro.is_empty() || fg.is_empty() {
            continue;
        }
        match fg.parse::<u32>() {
            Ok(id) if id > 0 => out.push((retro.to_string(), id)),
            _ => logd!("register: skipping non-numeric FanGraphs key {fg:?} for {retro}"),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHARD: &str = "\
key_person,key_uuid,key_mlbam,key_retro,key_bbref,key_bbref_minors,key_fangraphs,name_last,name_first
0a1b2c3d,uuid-1,121250,jeted001,jeterde01,,826,Jeter,Derek
0a1b2c3e,uuid-2,,,,,,Nobody,Known
0a1b2c3f,uuid-3,400085,ponss001,ponsosi01,,1874,Ponson,Sidney
0a1b2c40,uuid-4,,minoa001,,minoral01,,Minor,Al
";

    #[test]
    fn keeps_only_people_with_both_keys() {
        let pairs = parse(SHARD).unwrap();
        assert_eq!(pairs, vec![(s!("jeted001"), 826), (s!("ponss001"), 1874)]);
    }

    #[test]
    fn missing_column_is_an_error() {
        assert!(parse("key_person,key_retro\nx,y\n").is_err());
        assert!(parse("").is_err());
    }
}
