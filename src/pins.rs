//! Pinned section handling.
//!
//! Pinned trackers keep their origin category in storage; only the
//! presentation copy built here moves them into a synthetic section.

use crate::constants::PINNED_CATEGORY_TITLE;
use crate::models::{Tracker, TrackerCategory};

/// Move every pinned tracker into a synthetic "Pinned" category placed first.
///
/// Pinned trackers keep their relative store order. Origin categories left
/// empty are dropped; the pinned section is omitted when nothing is pinned.
pub fn partition_pinned(categories: &[TrackerCategory]) -> Vec<TrackerCategory> {
    let mut pinned = Vec::new();
    let mut rest = Vec::with_capacity(categories.len() + 1);

    for category in categories {
        let (on_top, remaining): (Vec<Tracker>, Vec<Tracker>) = category
            .trackers
            .iter()
            .cloned()
            .partition(|tracker| tracker.is_pinned);
        pinned.extend(on_top);
        if !remaining.is_empty() {
            rest.push(TrackerCategory::new(&category.title, remaining));
        }
    }

    if pinned.is_empty() {
        return rest;
    }
    rest.insert(0, TrackerCategory::new(PINNED_CATEGORY_TITLE, pinned));
    rest
}

/// Flip the pin flag, leaving everything else untouched.
pub fn toggle_pin(tracker: &Tracker) -> Tracker {
    Tracker {
        is_pinned: !tracker.is_pinned,
        ..tracker.clone()
    }
}
