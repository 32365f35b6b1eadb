// src/commands/dtos.rs

use crate::filter::Placeholder;
use crate::ledger::CompletionLedger;
use crate::models::{Rgba, Tracker, TrackerCategory, TrackerKind};
use crate::schedule::Schedule;
use crate::stats::{Statistics, StatisticsEntry};
use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

/// A tracker card as the main screen shows it on `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerResponse {
    pub id: Uuid,
    pub name: String,
    pub color: Rgba,
    pub emoji: String,
    pub kind: TrackerKind,
    pub schedule: Option<Schedule>,
    pub schedule_summary: Option<String>,
    pub is_pinned: bool,
    /// Lifetime completion count.
    pub completed_days: usize,
    pub is_completed: bool,
}

impl TrackerResponse {
    pub fn new(tracker: &Tracker, ledger: &CompletionLedger, date: NaiveDate) -> Self {
        Self {
            id: tracker.id,
            name: tracker.name.clone(),
            color: tracker.color,
            emoji: tracker.emoji.clone(),
            kind: tracker.kind(),
            schedule: tracker.schedule.clone(),
            schedule_summary: tracker.schedule.as_ref().map(Schedule::summary),
            is_pinned: tracker.is_pinned,
            completed_days: ledger.count_for(tracker.id),
            is_completed: ledger.is_completed_on(tracker.id, date),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryResponse {
    pub title: String,
    pub trackers: Vec<TrackerResponse>,
}

impl CategoryResponse {
    pub fn new(category: &TrackerCategory, ledger: &CompletionLedger, date: NaiveDate) -> Self {
        Self {
            title: category.title.clone(),
            trackers: category
                .trackers
                .iter()
                .map(|t| TrackerResponse::new(t, ledger, date))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisibleResponse {
    pub selected_date: NaiveDate,
    pub categories: Vec<CategoryResponse>,
    pub placeholder: Option<Placeholder>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub title: String,
    pub tracker_count: usize,
}

impl From<&TrackerCategory> for CategorySummary {
    fn from(category: &TrackerCategory) -> Self {
        Self {
            title: category.title.clone(),
            tracker_count: category.trackers.len(),
        }
    }
}

/// `statistics` is `None` (and `entries` empty) until something is completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsResponse {
    pub statistics: Option<Statistics>,
    pub entries: Vec<StatisticsEntry>,
}

impl From<Option<Statistics>> for StatisticsResponse {
    fn from(statistics: Option<Statistics>) -> Self {
        Self {
            statistics,
            entries: statistics.map(|s| s.entries().to_vec()).unwrap_or_default(),
        }
    }
}
