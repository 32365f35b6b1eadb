//! Fire-and-forget usage reporting.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Open,
    Close,
    Click,
}

/// UI element a `Click` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Item {
    AddTracker,
    CancelCreation,
    UpdateTracker,
    FilterByDate,
    Filter,
    Pinned,
    Unpinned,
    TrackerCompleted,
    TrackerNotCompleted,
    Edit,
    Delete,
}

/// Screen an event is reported from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Main,
    Statistics,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Main => "Main",
            Screen::Statistics => "Statistics",
        }
    }
}

impl Event {
    pub fn as_str(self) -> &'static str {
        match self {
            Event::Open => "open",
            Event::Close => "close",
            Event::Click => "click",
        }
    }
}

impl Item {
    pub fn as_str(self) -> &'static str {
        match self {
            Item::AddTracker => "add_tracker",
            Item::CancelCreation => "cancel_creation",
            Item::UpdateTracker => "update_tracker",
            Item::FilterByDate => "filter_by_date",
            Item::Filter => "filter",
            Item::Pinned => "pinned",
            Item::Unpinned => "unpinned",
            Item::TrackerCompleted => "tracker_completed",
            Item::TrackerNotCompleted => "tracker_not_completed",
            Item::Edit => "edit",
            Item::Delete => "delete",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for a click on the main screen.
pub fn main_screen_click(item: Item) -> Value {
    screen_params(Screen::Main, Some(item))
}

/// Event parameters: the screen, plus the item for clicks.
pub fn screen_params(screen: Screen, item: Option<Item>) -> Value {
    match item {
        Some(item) => json!({ "screen": screen.as_str(), "item": item.as_str() }),
        None => json!({ "screen": screen.as_str() }),
    }
}

/// Receives usage events. Implementations must not fail the caller.
pub trait AnalyticsSink {
    fn report(&self, event: Event, params: &Value);
}

/// Writes events to the log at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl AnalyticsSink for LogSink {
    fn report(&self, event: Event, params: &Value) {
        log::info!("analytics: {event} {params}");
    }
}

/// Keeps every reported event in memory. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<(Event, Value)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(Event, Value)> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl AnalyticsSink for MemorySink {
    fn report(&self, event: Event, params: &Value) {
        match self.events.lock() {
            Ok(mut events) => events.push((event, params.clone())),
            Err(poisoned) => poisoned.into_inner().push((event, params.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_screen_click_params() {
        let params = main_screen_click(Item::TrackerCompleted);
        assert_eq!(params["screen"], "Main");
        assert_eq!(params["item"], "tracker_completed");
    }

    #[test]
    fn test_memory_sink_shares_buffer() {
        let sink = MemorySink::new();
        let handle = sink.clone();
        sink.report(Event::Open, &json!({ "screen": "Main" }));
        handle.report(Event::Click, &main_screen_click(Item::Filter));

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].0, Event::Open);
        assert_eq!(events[1].1["item"], "filter");
    }

    #[test]
    fn test_screen_params_without_item() {
        let params = screen_params(Screen::Statistics, None);
        assert_eq!(params, json!({ "screen": "Statistics" }));
    }

    #[test]
    fn test_item_deserializes_from_snake_case() {
        let item: Item = serde_json::from_value(json!("cancel_creation")).unwrap();
        assert_eq!(item, Item::CancelCreation);
    }

    #[test]
    fn test_item_serializes_like_as_str() {
        let json = serde_json::to_value(Item::AddTracker).unwrap();
        assert_eq!(json, Item::AddTracker.as_str());
    }
}
