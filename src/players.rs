// src/players.rs
//! Player id resolution: Retrosheet ids → FanGraphs ids.
//!
//! [`IdResolver`] is a run-scoped cache in front of a [`PlayerLookup`] service.
//! Each game's ids go through [`IdResolver::resolve_batch`], which issues at most one
//! lookup, and only for ids not already cached. Entries are never overwritten.

use std::collections::HashMap;

use crate::config::consts::REGISTER_SHARDS;
use crate::core::net::{Net, join_location};
use crate::error::{Error, Result};
use crate::specs::register;

/// Bulk reverse-lookup service. Ids it cannot map are simply absent from the result.
pub trait PlayerLookup {
    fn reverse_lookup(&mut self, ids: &[String]) -> Result<HashMap<String, u32>>;
}

pub struct IdResolver<L> {
    lookup: L,
    cache: HashMap<String, u32>,
    calls: usize,
}

impl<L: PlayerLookup> IdResolver<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup, cache: HashMap::new(), calls: 0 }
    }

    /// Cached target id for `id`.
    pub fn get(&self, id: &str) -> Option<u32> {
        self.cache.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Lookup calls issued so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Make sure every id in `ids` is cached.
    ///
    /// Already-cached ids are not re-queried; when none are new, no call is made.
    /// Ids the service leaves unmapped fail the game with [`Error::UnresolvedPlayers`].
    pub fn resolve_batch<'i>(&mut self, game_id: &str, ids: impl IntoIterator<Item = &'i str>) -> Result<()> {
        let mut fresh: Vec<String> = ids
            .into_iter()
            .filter(|id| !self.cache.contains_key(*id))
            .map(str::to_string)
            .collect();
        if fresh.is_empty() {
            return Ok(());
        }
        fresh.sort();
        fresh.dedup();

        self.calls += 1;
        let found = self.lookup.reverse_lookup(&fresh)?;
        logd!("{game_id}: looked up {} ids, {} mapped", fresh.len(), found.len());

        let mut missing = Vec::new();
        for id in fresh {
            match found.get(&id) {
                Some(&target) => {
                    self.cache.entry(id).or_insert(target);
                }
                None => missing.push(id),
            }
        }
        if !missing.is_empty() {
            return Err(Error::UnresolvedPlayers { game_id: game_id.to_string(), ids: missing });
        }
        Ok(())
    }
}

/// The Chadwick register (`people-0.csv` … `people-f.csv`) as a lookup service.
/// All shards are read on first use and then kept for the run.
pub struct RegisterLookup {
    net: Net,
    source: String,
    table: Option<HashMap<String, u32>>,
}

impl RegisterLookup {
    /// `source` is a URL prefix or a local directory holding the shards.
    pub fn new(net: Net, source: impl Into<String>) -> Self {
        Self { net, source: source.into(), table: None }
    }

    fn load(&mut self) -> Result<&HashMap<String, u32>> {
        if self.table.is_none() {
            let mut table = HashMap::new();
            for shard in REGISTER_SHARDS.chars() {
                let location = join_location(&self.source, &format!("people-{shard}.csv"));
                let text = self.net.read_source(&location)?;
                for (retro, fg) in register::parse(&text)? {
                    table.entry(retro).or_insert(fg);
                }
            }
            logf!("Player register: {} mapped ids from {}", table.len(), self.source);
            self.table = Some(table);
        }
        self.table.as_ref().ok_or_else(|| Error::Source(s!("player register not loaded")))
    }
}

impl PlayerLookup for RegisterLookup {
    fn reverse_lookup(&mut self, ids: &[String]) -> Result<HashMap<String, u32>> {
        let table = self.load()?;
        Ok(ids
            .iter()
            .filter_map(|id| table.get(id).map(|&fg| (id.clone(), fg)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Maps every id to its byte sum, except ids starting with `x`. Records each request.
    #[derive(Default)]
    struct CountingLookup {
        requests: Vec<Vec<String>>,
    }

    impl PlayerLookup for CountingLookup {
        fn reverse_lookup(&mut self, ids: &[String]) -> Result<HashMap<String, u32>> {
            self.requests.push(ids.to_vec());
            Ok(ids
                .iter()
                .filter(|id| !id.starts_with('x'))
                .map(|id| (id.clone(), id.bytes().map(u32::from).sum()))
                .collect())
        }
    }

    #[test]
    fn cached_ids_are_not_requeried() {
        let mut r = IdResolver::new(CountingLookup::default());
        r.resolve_batch("g1", ["aaa", "bbb"]).unwrap();
        r.resolve_batch("g2", ["bbb", "ccc", "ccc"]).unwrap();
        assert_eq!(r.lookup().requests, vec![vec![s!("aaa"), s!("bbb")], vec![s!("ccc")]]);
        assert_eq!(r.len(), 3);
    }

    #[test]
    fn fully_cached_batch_makes_no_call() {
        let mut r = IdResolver::new(CountingLookup::default());
        r.resolve_batch("g1", ["aaa"]).unwrap();
        let first = r.get("aaa");
        r.resolve_batch("g2", ["aaa"]).unwrap();
        assert_eq!(r.calls(), 1);
        assert_eq!(r.get("aaa"), first);
    }

    #[test]
    fn unmapped_ids_fail_the_game() {
        let mut r = IdResolver::new(CountingLookup::default());
        let err = r.resolve_batch("BAL200304010", ["aaa", "xyz"]).unwrap_err();
        match err {
            Error::UnresolvedPlayers { game_id, ids } => {
                assert_eq!(game_id, "BAL200304010");
                assert_eq!(ids, vec![s!("xyz")]);
            }
            other => panic!("unexpected error: {other}"),
        }
        // the mapped half is still cached
        assert!(r.get("aaa").is_some());
    }

    #[test]
    fn register_reads_all_shards() {
        let dir = tempfile::tempdir().unwrap();
        for shard in REGISTER_SHARDS.chars() {
            let body = match shard {
                '0' => "key_retro,key_fangraphs\njeted001,826\n",
                'f' => "key_retro,key_fangraphs\nponss001,1874\n",
                _ => "key_retro,key_fangraphs\n",
            };
            std::fs::write(dir.path().join(format!("people-{shard}.csv")), body).unwrap();
        }
        let mut reg = RegisterLookup::new(Net::new(None).unwrap(), dir.path().to_string_lossy());
        let got = reg
            .reverse_lookup(&[s!("jeted001"), s!("ponss001"), s!("nobody01")])
            .unwrap();
        assert_eq!(got.len(), 2);
        assert_eq!(got["ponss001"], 1874);
    }
}
