// src/specs/mod.rs
//! # Source “specs” module
//!
//! Pure parsers for the external tables the pipeline consumes. Each spec knows the
//! layout of exactly one source and turns its raw text into typed rows.
//!
//! ## What lives here
//! - **`register`**: Chadwick person register shards (CSV) → `(retro id, FanGraphs id)`.
//! - **`lahman`**: Lahman `Teams.csv` → `(season, Retrosheet code, Baseball-Reference code)`.
//! - **`schedule`**: Baseball-Reference team schedule page (HTML) → `ScheduleRow`s.
//!
//! ## What does **not** live here
//! - **Fetching**: callers hand in text; `core::net` decides URL vs. local file.
//! - **Caching**: the resolver and schedule caches own their lifetimes.
//!
//! ## Conventions
//! - Columns are located **by header name**, never by position.
//! - Rows that are not data (repeated headers, future games, blank ids) are skipped
//!   quietly; a missing *column* is a `Source` error.
//! - Everything here is testable offline against small captured fixtures.
pub mod lahman;
pub mod register;
pub mod schedule;
