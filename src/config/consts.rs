// src/config/consts.rs

// Inputs
pub const DEFAULT_EVENTS_DIR: &str = "events";
pub const DEFAULT_CONFIG_FILE: &str = "retro_games.toml";

// Local cache
pub const STORE_DIR: &str = ".store";
pub const STORE_FILE: &str = "games.json";
pub const LOG_FILE: &str = "debug.log";

// Default season range
pub const DEFAULT_START_SEASON: i32 = 2003;
pub const DEFAULT_END_SEASON: i32 = 2023;

// Net config
pub const USER_AGENT: &str = "retro_games/0.3";
pub const REGISTER_URL: &str = "https://raw.githubusercontent.com/chadwickbureau/register/master/data";
pub const LAHMAN_TEAMS_URL: &str =
    "https://raw.githubusercontent.com/chadwickbureau/baseballdatabank/master/core/Teams.csv";
pub const SCHEDULE_URL: &str = "https://www.baseball-reference.com/teams";

// Register is split into one shard per leading hex digit of the person key
pub const REGISTER_SHARDS: &str = "0123456789abcdef";

// Last season the Lahman team table covers; later seasons reuse its mapping
pub const COVERAGE_BOUNDARY: i32 = 2021;

// Schedule pages rate-limit hard
pub const REQUEST_PAUSE_MS: u64 = 3_100; // be polite
