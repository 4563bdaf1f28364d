// src/store.rs
//! Durable cache of a resolved game collection, keyed by the season range it covers.
//!
//! A store whose range differs from the request is a miss, never a partial hit. It is
//! deleted so the next write starts clean. An unreadable store is treated the same way.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::game::Game;

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    start_season: i32,
    end_season: i32,
    games: Vec<Game>,
}

/// Cached games for exactly `start..=end`, or `None` on a miss.
pub fn load(path: &Path, start: i32, end: i32) -> Result<Option<Vec<Game>>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)?;
    let stored: StoreFile = match serde_json::from_str(&text) {
        Ok(s) => s,
        Err(e) => {
            logw!("store {} unreadable ({e}); discarding", path.display());
            fs::remove_file(path)?;
            return Ok(None);
        }
    };
    if (stored.start_season, stored.end_season) != (start, end) {
        logf!(
            "store holds {}-{}, requested {start}-{end}; discarding",
            stored.start_season, stored.end_season
        );
        fs::remove_file(path)?;
        return Ok(None);
    }
    logf!("store hit: {} games for {start}-{end}", stored.games.len());
    Ok(Some(stored.games))
}

/// Write the collection. The file is replaced atomically so a crash never leaves half a store.
pub fn save(path: &Path, start: i32, end: i32, games: &[Game]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("json.tmp");
    {
        let mut w = BufWriter::new(fs::File::create(&tmp)?);
        serde_json::to_writer(&mut w, &StoreFileRef { start_season: start, end_season: end, games })?;
        w.flush()?;
    }
    fs::rename(&tmp, path)?;
    logd!("store written: {} games to {}", games.len(), path.display());
    Ok(())
}

/// Borrowing twin of [`StoreFile`] for writing.
#[derive(Serialize)]
struct StoreFileRef<'a> {
    start_season: i32,
    end_season: i32,
    games: &'a [Game],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_store_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.json");
        fs::write(&path, "{not json").unwrap();
        assert_eq!(load(&path, 2003, 2004).unwrap(), None);
        assert!(!path.exists());
    }

    #[test]
    fn absent_store_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load(&dir.path().join("none.json"), 2003, 2004).unwrap(), None);
    }

    #[test]
    fn save_creates_parent_and_leaves_no_temp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".store").join("games.json");
        save(&path, 2003, 2003, &[]).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
        assert_eq!(load(&path, 2003, 2003).unwrap(), Some(Vec::new()));
    }
}
