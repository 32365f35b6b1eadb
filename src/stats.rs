//! Summary statistics derived from the completion ledger.

use crate::ledger::CompletionLedger;
use serde::{Deserialize, Serialize};

/// Aggregates shown on the statistics screen.
///
/// `best_period` is the highest lifetime completion count of any single
/// tracker, not a run of consecutive days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub best_period: usize,
    pub ideal_days: usize,
    pub trackers_completed: usize,
    pub average_value: usize,
}

/// One titled row on the statistics screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatisticsEntry {
    pub title: &'static str,
    pub value: usize,
}

impl Statistics {
    /// Rows in screen order.
    pub fn entries(&self) -> [StatisticsEntry; 4] {
        [
            StatisticsEntry {
                title: "bestPeriod",
                value: self.best_period,
            },
            StatisticsEntry {
                title: "idealDays",
                value: self.ideal_days,
            },
            StatisticsEntry {
                title: "trackersCompleted",
                value: self.trackers_completed,
            },
            StatisticsEntry {
                title: "averageValue",
                value: self.average_value,
            },
        ]
    }
}

/// `None` when nothing has ever been completed.
pub fn compute(ledger: &CompletionLedger) -> Option<Statistics> {
    if ledger.is_empty() {
        return None;
    }
    Some(Statistics {
        best_period: ledger.max_count(),
        ideal_days: 0,
        trackers_completed: ledger.len(),
        average_value: 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrackerRecord;
    use crate::test_utils::day;
    use uuid::Uuid;

    #[test]
    fn test_empty_ledger_has_no_statistics() {
        assert_eq!(compute(&CompletionLedger::new()), None);
    }

    #[test]
    fn test_counts() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let ledger = CompletionLedger::from_records([
            TrackerRecord::new(a, day(2024, 9, 1)),
            TrackerRecord::new(a, day(2024, 9, 5)),
            TrackerRecord::new(a, day(2024, 9, 9)),
            TrackerRecord::new(b, day(2024, 9, 1)),
        ]);

        let stats = compute(&ledger).unwrap();
        assert_eq!(stats.best_period, 3);
        assert_eq!(stats.trackers_completed, 4);
        assert_eq!(stats.ideal_days, 0);
        assert_eq!(stats.average_value, 0);
    }

    #[test]
    fn test_entries_order() {
        let stats = Statistics {
            best_period: 3,
            ideal_days: 0,
            trackers_completed: 4,
            average_value: 0,
        };
        let titles: Vec<_> = stats.entries().iter().map(|e| e.title).collect();
        assert_eq!(titles, ["bestPeriod", "idealDays", "trackersCompleted", "averageValue"]);
        assert_eq!(stats.entries()[2].value, 4);
    }

    #[test]
    fn test_serializes_camel_case() {
        let stats = Statistics {
            best_period: 1,
            ideal_days: 0,
            trackers_completed: 1,
            average_value: 0,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["bestPeriod"], 1);
        assert_eq!(json["trackersCompleted"], 1);
    }
}
