// tests/store_roundtrip.rs
mod common;

use retro_games::config::options::{AppOptions, MalformedPolicy};
use retro_games::progress::NullProgress;
use retro_games::runner::{build, build_with};
use retro_games::schedule::Outcome::{Loss, Win};
use retro_games::walker::Pipeline;
use retro_games::{file, store};

use common::*;

type FakePipeline = Pipeline<CountingLookup, FakeSchedules, FakeCodes>;

fn seattle_pipeline() -> FakePipeline {
    let mut sched = FakeSchedules::default();
    sched.add(2010, "SEA", &[(4, 12, 0, Win, 4, 3), (4, 13, 0, Loss, 4, 4)]);
    sched.add(2010, "OAK", &[(4, 12, 0, Loss, 3, 4), (4, 13, 0, Win, 4, 4)]);
    Pipeline::new(CountingLookup::default(), sched, FakeCodes::default(), 2021, MalformedPolicy::Abort)
}

fn build_one_season(dir: &std::path::Path) -> (AppOptions, Vec<retro_games::Game>) {
    let events = dir.join("events");
    std::fs::create_dir_all(&events).unwrap();
    write(
        &events,
        "2010SEA.EVA",
        &[
            game_text("SEA201004120", "2010/04/12", 0, "OAK", "SEA", "seap", &[]),
            game_text("SEA201004130", "2010/04/13", 0, "OAK", "SEA", "oakp", &[]),
        ],
    );

    let opts = AppOptions {
        events_dir: events,
        store_path: dir.join(".store").join("games.json"),
        start_season: 2010,
        end_season: 2010,
        ..AppOptions::default()
    };
    let (games, _) = build_with(&opts, &mut seattle_pipeline(), &mut NullProgress).unwrap();
    (opts, games)
}

#[test]
fn matching_range_reproduces_the_collection() {
    let tmp = tempfile::tempdir().unwrap();
    let (opts, games) = build_one_season(tmp.path());
    assert_eq!(games.len(), 2);

    let loaded = store::load(&opts.store_path, 2010, 2010).unwrap();
    assert_eq!(loaded, Some(games));
}

#[test]
fn mismatched_range_is_a_miss_and_discards_the_store() {
    let tmp = tempfile::tempdir().unwrap();
    let (_, games) = build_one_season(tmp.path());

    let path = tmp.path().join("wide.json");
    store::save(&path, 2003, 2023, &games).unwrap();

    assert_eq!(store::load(&path, 2010, 2012).unwrap(), None);
    assert!(!path.exists(), "stale store removed before regeneration");
}

#[test]
fn store_hit_skips_every_service() {
    let tmp = tempfile::tempdir().unwrap();
    let (opts, games) = build_one_season(tmp.path());

    let mut p = seattle_pipeline();
    let (loaded, summary) = build(&opts, false, &mut p, &mut NullProgress).unwrap();
    assert!(summary.from_store);
    assert_eq!(loaded, games);
    assert_eq!(p.resolver.calls(), 0);
    assert!(p.resolver.lookup().requests.is_empty());
    assert!(p.schedules.fetched.is_empty());
    assert!(p.team_codes.source().requested.is_empty());
}

#[test]
fn forced_build_ignores_a_matching_store() {
    let tmp = tempfile::tempdir().unwrap();
    let (opts, _) = build_one_season(tmp.path());

    let mut p = seattle_pipeline();
    let (_, summary) = build(&opts, true, &mut p, &mut NullProgress).unwrap();
    assert!(!summary.from_store);
    assert_eq!(p.schedules.fetched.len(), 2);
}

#[test]
fn mismatched_store_triggers_rebuild_and_rewrite() {
    let tmp = tempfile::tempdir().unwrap();
    let (mut opts, games) = build_one_season(tmp.path());
    store::save(&opts.store_path, 2003, 2023, &games).unwrap();

    (opts.start_season, opts.end_season) = (2010, 2012);
    let mut p = seattle_pipeline();
    let (rebuilt, summary) = build(&opts, false, &mut p, &mut NullProgress).unwrap();

    assert!(!summary.from_store);
    assert_eq!(summary.seasons, 3);
    assert_eq!(rebuilt, games);
    assert!(p.resolver.calls() > 0);
    assert_eq!(p.schedules.fetched.len(), 2);

    // rewritten for the new range; the old range no longer matches
    assert_eq!(store::load(&opts.store_path, 2010, 2012).unwrap(), Some(games));
    assert_eq!(store::load(&opts.store_path, 2003, 2023).unwrap(), None);
}

#[test]
fn export_matches_stored_games() {
    let tmp = tempfile::tempdir().unwrap();
    let (opts, games) = build_one_season(tmp.path());
    let out = tmp.path().join("out").join("games.csv");
    file::export_games(&out, &games).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("game_id,year,month,day,game_number,home_team,away_team,home_wins"));
    assert!(lines[1].starts_with("SEA201004120,2010,4,12,0,SEA,OAK,3,3,3,3,"));
    assert!(lines[2].ends_with(",0"), "visitors won the second game");
    assert!(opts.store_path.exists());
}
