//! In-memory index of completion records.

use crate::models::TrackerRecord;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

/// Completion facts indexed by tracker.
///
/// Holds at most one entry per (tracker, day), so counts can never be
/// inflated by duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionLedger {
    by_tracker: HashMap<Uuid, BTreeSet<NaiveDate>>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index from stored records; duplicate records collapse.
    pub fn from_records(records: impl IntoIterator<Item = TrackerRecord>) -> Self {
        let mut ledger = Self::new();
        for record in records {
            ledger.insert(record.tracker_id, record.date);
        }
        ledger
    }

    /// Whether `record_completion` would accept this completion.
    pub fn can_record(&self, tracker_id: Uuid, date: NaiveDate, today: NaiveDate) -> bool {
        date <= today && !self.is_completed_on(tracker_id, date)
    }

    /// Mark `tracker_id` complete on `date`.
    ///
    /// No-op (returns `false`) if already completed that day or if `date`
    /// is after `today`.
    pub fn record_completion(&mut self, tracker_id: Uuid, date: NaiveDate, today: NaiveDate) -> bool {
        if date > today {
            log::debug!("Ignoring completion of {tracker_id} for future day {date}");
            return false;
        }
        self.insert(tracker_id, date)
    }

    /// Returns `false` if there was nothing to remove.
    pub fn remove_completion(&mut self, tracker_id: Uuid, date: NaiveDate) -> bool {
        let Some(days) = self.by_tracker.get_mut(&tracker_id) else {
            return false;
        };
        let removed = days.remove(&date);
        if days.is_empty() {
            self.by_tracker.remove(&tracker_id);
        }
        removed
    }

    /// Drop every completion of a deleted tracker.
    pub fn remove_tracker(&mut self, tracker_id: Uuid) -> usize {
        self.by_tracker.remove(&tracker_id).map_or(0, |days| days.len())
    }

    /// Lifetime completion count (not a consecutive streak).
    pub fn count_for(&self, tracker_id: Uuid) -> usize {
        self.by_tracker.get(&tracker_id).map_or(0, BTreeSet::len)
    }

    pub fn is_completed_on(&self, tracker_id: Uuid, date: NaiveDate) -> bool {
        self.by_tracker
            .get(&tracker_id)
            .is_some_and(|days| days.contains(&date))
    }

    /// Total number of completion records.
    pub fn len(&self) -> usize {
        self.by_tracker.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tracker.is_empty()
    }

    /// Highest lifetime count over all trackers.
    pub fn max_count(&self) -> usize {
        self.by_tracker.values().map(BTreeSet::len).max().unwrap_or(0)
    }

    fn insert(&mut self, tracker_id: Uuid, date: NaiveDate) -> bool {
        self.by_tracker.entry(tracker_id).or_default().insert(date)
    }
}
