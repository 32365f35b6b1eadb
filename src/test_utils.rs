//! Shared test utilities.
//!
//! Common setup and fixtures used across test modules.

#![cfg(test)]

use crate::db::{migrations, Database};
use crate::models::{Rgba, Tracker, TrackerCategory};
use crate::schedule::Schedule;
use chrono::NaiveDate;
use tempfile::{tempdir, TempDir};

/// Create a temporary test database with migrations applied.
///
/// Returns a tuple of (Database, TempDir). The TempDir must be kept alive
/// for the duration of the test to prevent the database file from being deleted.
pub fn setup_test_db() -> (Database, TempDir) {
    let dir = tempdir().expect("Failed to create temp directory for test DB");
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).expect("Failed to open test database");
    migrations::run(db.connection()).expect("Failed to run migrations on test DB");
    (db, dir)
}

/// Calendar day shorthand.
pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Habit with the given weekday numbers (1 = Monday).
pub fn habit(name: &str, days: &str) -> Tracker {
    let schedule = Schedule::parse(days).expect("valid test schedule");
    Tracker::new(name, Rgba::PALETTE[0], "🙂", Some(schedule))
}

/// Irregular event (no schedule).
pub fn event(name: &str) -> Tracker {
    Tracker::new(name, Rgba::PALETTE[1], "⭐", None)
}

pub fn pinned(mut tracker: Tracker) -> Tracker {
    tracker.is_pinned = true;
    tracker
}

pub fn category(title: &str, trackers: Vec<Tracker>) -> TrackerCategory {
    TrackerCategory::new(title, trackers)
}
