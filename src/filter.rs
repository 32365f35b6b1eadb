//! Visible tracker list for the main screen.
//!
//! Stages run in a fixed order over the pin-partitioned categories:
//! search text, then schedule, then filter mode. Categories emptied by a
//! stage are dropped before the next one runs.

use crate::ledger::CompletionLedger;
use crate::models::{Tracker, TrackerCategory};
use crate::pins::partition_pinned;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    #[default]
    AllTrackers,
    /// Jump to today, then show everything due.
    TodayTrackers,
    CompletedTrackers,
    UncompletedTrackers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleQuery {
    #[serde(default)]
    pub search_text: String,
    pub selected_date: NaiveDate,
    #[serde(default)]
    pub filter_mode: FilterMode,
}

impl VisibleQuery {
    pub fn new(selected_date: NaiveDate) -> Self {
        Self {
            search_text: String::new(),
            selected_date,
            filter_mode: FilterMode::AllTrackers,
        }
    }

    #[must_use]
    pub fn with_search(mut self, search_text: &str) -> Self {
        self.search_text = search_text.to_string();
        self
    }

    #[must_use]
    pub fn with_mode(mut self, filter_mode: FilterMode) -> Self {
        self.filter_mode = filter_mode;
        self
    }
}

/// Pipeline output: grouped trackers plus the date they were computed for.
///
/// `selected_date` differs from the query only for `TodayTrackers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visible {
    pub categories: Vec<TrackerCategory>,
    pub selected_date: NaiveDate,
}

impl Visible {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn tracker_count(&self) -> usize {
        self.categories.iter().map(|c| c.trackers.len()).sum()
    }
}

/// Which empty-state to show when nothing is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    /// The user has not created any tracker yet.
    NoTrackers,
    /// Trackers exist but none match the current search/date/filter.
    NothingFound,
}

/// Date the pipeline actually filters on.
pub fn effective_date(mode: FilterMode, selected_date: NaiveDate, today: NaiveDate) -> NaiveDate {
    match mode {
        FilterMode::TodayTrackers => today,
        FilterMode::AllTrackers | FilterMode::CompletedTrackers | FilterMode::UncompletedTrackers => {
            selected_date
        }
    }
}

pub fn compute_visible(
    categories: &[TrackerCategory],
    query: &VisibleQuery,
    ledger: &CompletionLedger,
    today: NaiveDate,
) -> Visible {
    let selected_date = effective_date(query.filter_mode, query.selected_date, today);

    let mut visible = partition_pinned(categories);
    if !query.search_text.is_empty() {
        let needle = query.search_text.to_lowercase();
        visible = retain_trackers(visible, |t| t.name.to_lowercase().contains(&needle));
    }
    visible = retain_trackers(visible, |t| t.is_due(selected_date));
    visible = match query.filter_mode {
        FilterMode::AllTrackers | FilterMode::TodayTrackers => visible,
        FilterMode::CompletedTrackers => {
            retain_trackers(visible, |t| ledger.is_completed_on(t.id, selected_date))
        }
        FilterMode::UncompletedTrackers => {
            retain_trackers(visible, |t| !ledger.is_completed_on(t.id, selected_date))
        }
    };

    let visible = Visible {
        categories: visible,
        selected_date,
    };
    log::debug!(
        "Visible for {selected_date} ({:?}): {} trackers in {} categories",
        query.filter_mode,
        visible.tracker_count(),
        visible.categories.len()
    );
    visible
}

/// Empty-state for `visible`, or `None` if something is shown.
pub fn placeholder(visible: &Visible, has_trackers: bool, search_text: &str) -> Option<Placeholder> {
    if !visible.is_empty() {
        return None;
    }
    if has_trackers || !search_text.is_empty() {
        Some(Placeholder::NothingFound)
    } else {
        Some(Placeholder::NoTrackers)
    }
}

fn retain_trackers(
    categories: Vec<TrackerCategory>,
    keep: impl Fn(&Tracker) -> bool,
) -> Vec<TrackerCategory> {
    categories
        .into_iter()
        .filter_map(|mut category| {
            category.trackers.retain(&keep);
            (!category.is_empty()).then_some(category)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{category, day, event, habit, pinned};
    use pretty_assertions::assert_eq;

    // 2024-09-03 is a Tuesday.
    const TUESDAY: (i32, u32, u32) = (2024, 9, 3);

    fn tuesday() -> NaiveDate {
        day(TUESDAY.0, TUESDAY.1, TUESDAY.2)
    }

    fn layout(visible: &Visible) -> Vec<(String, Vec<String>)> {
        visible
            .categories
            .iter()
            .map(|c| (c.title.clone(), c.trackers.iter().map(|t| t.name.clone()).collect()))
            .collect()
    }

    fn health() -> (Vec<TrackerCategory>, Tracker) {
        let a = habit("A", "1,2,3,4,5,6,7");
        let b = habit("B", "1");
        (vec![category("Health", vec![a.clone(), b])], a)
    }

    #[test]
    fn test_schedule_excludes_trackers_not_due() {
        let (categories, _) = health();
        let visible = compute_visible(
            &categories,
            &VisibleQuery::new(tuesday()),
            &CompletionLedger::new(),
            tuesday(),
        );
        assert_eq!(layout(&visible), vec![("Health".into(), vec!["A".into()])]);
    }

    #[test]
    fn test_completed_and_uncompleted_modes() {
        let (categories, a) = health();
        let mut ledger = CompletionLedger::new();
        ledger.record_completion(a.id, tuesday(), tuesday());

        let query = VisibleQuery::new(tuesday()).with_mode(FilterMode::CompletedTrackers);
        let visible = compute_visible(&categories, &query, &ledger, tuesday());
        assert_eq!(layout(&visible), vec![("Health".into(), vec!["A".into()])]);

        let query = VisibleQuery::new(tuesday()).with_mode(FilterMode::UncompletedTrackers);
        let visible = compute_visible(&categories, &query, &ledger, tuesday());
        assert!(visible.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let categories = vec![
            category("Health", vec![habit("Morning run", "1,2,3,4,5,6,7")]),
            category("Home", vec![event("Clean the RUNWAY"), event("Cook")]),
        ];
        let query = VisibleQuery::new(tuesday()).with_search("rUn");
        let visible = compute_visible(&categories, &query, &CompletionLedger::new(), tuesday());
        assert_eq!(
            layout(&visible),
            vec![
                ("Health".into(), vec!["Morning run".into()]),
                ("Home".into(), vec!["Clean the RUNWAY".into()]),
            ]
        );
    }

    #[test]
    fn test_search_runs_before_schedule() {
        let (categories, _) = health();
        let query = VisibleQuery::new(tuesday()).with_search("B");
        let visible = compute_visible(&categories, &query, &CompletionLedger::new(), tuesday());
        assert!(visible.is_empty());
        assert_eq!(
            placeholder(&visible, true, &query.search_text),
            Some(Placeholder::NothingFound)
        );
    }

    #[test]
    fn test_today_mode_overrides_selected_date() {
        let (categories, _) = health();
        let monday = day(2024, 9, 2);
        let query = VisibleQuery::new(tuesday()).with_mode(FilterMode::TodayTrackers);

        let visible = compute_visible(&categories, &query, &CompletionLedger::new(), monday);
        assert_eq!(visible.selected_date, monday);
        assert_eq!(layout(&visible), vec![("Health".into(), vec!["A".into(), "B".into()])]);
    }

    #[test]
    fn test_irregular_events_show_every_day() {
        let categories = vec![category("Misc", vec![event("Dentist")])];
        for offset in 0..7 {
            let date = tuesday() + chrono::Days::new(offset);
            let visible =
                compute_visible(&categories, &VisibleQuery::new(date), &CompletionLedger::new(), date);
            assert_eq!(visible.tracker_count(), 1);
        }
    }

    #[test]
    fn test_pinned_first_then_filtered() {
        let (mut categories, _) = health();
        categories.push(category("Home", vec![pinned(habit("C", "2"))]));

        let visible = compute_visible(
            &categories,
            &VisibleQuery::new(tuesday()),
            &CompletionLedger::new(),
            tuesday(),
        );
        assert_eq!(
            layout(&visible),
            vec![
                ("Pinned".into(), vec!["C".into()]),
                ("Health".into(), vec!["A".into()]),
            ]
        );
    }

    #[test]
    fn test_pinned_section_disappears_when_filtered_out() {
        let categories = vec![category("Health", vec![pinned(habit("B", "1")), event("E")])];
        let visible = compute_visible(
            &categories,
            &VisibleQuery::new(tuesday()),
            &CompletionLedger::new(),
            tuesday(),
        );
        assert_eq!(layout(&visible), vec![("Health".into(), vec!["E".into()])]);
    }

    #[test]
    fn test_placeholder_selection() {
        let empty = Visible {
            categories: Vec::new(),
            selected_date: tuesday(),
        };
        assert_eq!(placeholder(&empty, false, ""), Some(Placeholder::NoTrackers));
        assert_eq!(placeholder(&empty, true, ""), Some(Placeholder::NothingFound));
        assert_eq!(placeholder(&empty, false, "x"), Some(Placeholder::NothingFound));

        let (categories, _) = health();
        let shown = compute_visible(
            &categories,
            &VisibleQuery::new(tuesday()),
            &CompletionLedger::new(),
            tuesday(),
        );
        assert_eq!(placeholder(&shown, true, ""), None);
    }
}
