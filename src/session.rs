//! Main-screen session controller.
//!
//! Owns the category list and completion ledger loaded from a
//! [`TrackerStore`]. Every mutation is persisted first and in-memory state
//! only changes after the store reports success, so a failed write leaves
//! the session exactly as it was.
//!
//! Completion toggles are applied to the ledger directly once stored.
//! Category and tracker changes are re-read from the store; if that re-read
//! fails the write stays committed, the error is returned, and the next
//! mutation reloads before doing anything else.

use crate::analytics::{
    main_screen_click, screen_params, AnalyticsSink, Event, Item, LogSink, Screen,
};
use crate::error::AppError;
use crate::filter::{self, Placeholder, Visible, VisibleQuery};
use crate::ledger::CompletionLedger;
use crate::models::{Rgba, Tracker, TrackerCategory, TrackerRecord};
use crate::pins;
use crate::schedule::Schedule;
use crate::stats::{self, Statistics};
use crate::store::TrackerStore;
use crate::validation::{validate_category_title, validate_emoji, validate_tracker_name};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::mpsc::{self, Receiver, Sender};
use uuid::Uuid;

/// Published to subscribers after a successful mutation and reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    CategoriesChanged,
    RecordsChanged,
}

/// Input of the creation flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTracker {
    pub name: String,
    pub color: Rgba,
    pub emoji: String,
    /// `None` creates an irregular event.
    #[serde(default)]
    pub schedule: Option<Schedule>,
    pub category_title: String,
}

/// Input of the edit flow: a full replacement of the editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerEdit {
    pub name: String,
    pub color: Rgba,
    pub emoji: String,
    #[serde(default)]
    pub schedule: Option<Schedule>,
    /// Absent keeps the current pin state.
    #[serde(default)]
    pub is_pinned: Option<bool>,
    /// Absent keeps the current category.
    #[serde(default)]
    pub category_title: Option<String>,
}

pub struct TrackerSession<S: TrackerStore> {
    store: S,
    categories: Vec<TrackerCategory>,
    ledger: CompletionLedger,
    subscribers: Vec<Sender<SessionEvent>>,
    analytics: Box<dyn AnalyticsSink>,
    /// Last query shown, to report filter and date changes.
    last_query: Option<VisibleQuery>,
    /// Set when a reload after a committed write failed.
    stale: bool,
}

impl<S: TrackerStore> TrackerSession<S> {
    /// Load everything from `store`, reporting analytics to the log.
    pub fn new(store: S) -> Result<Self, AppError> {
        Self::with_analytics(store, Box::new(LogSink))
    }

    pub fn with_analytics(store: S, analytics: Box<dyn AnalyticsSink>) -> Result<Self, AppError> {
        let mut session = Self {
            store,
            categories: Vec::new(),
            ledger: CompletionLedger::new(),
            subscribers: Vec::new(),
            analytics,
            last_query: None,
            stale: false,
        };
        session.reload()?;
        Ok(session)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Categories as stored, without the pinned section.
    pub fn categories(&self) -> &[TrackerCategory] {
        &self.categories
    }

    pub fn ledger(&self) -> &CompletionLedger {
        &self.ledger
    }

    pub fn has_trackers(&self) -> bool {
        self.categories.iter().any(|c| !c.is_empty())
    }

    pub fn find_tracker(&self, id: Uuid) -> Option<&Tracker> {
        self.find_with_category(id).map(|(_, tracker)| tracker)
    }

    /// Lifetime completion count shown on the tracker card.
    pub fn completion_count(&self, id: Uuid) -> usize {
        self.ledger.count_for(id)
    }

    /// Re-read categories and records from the store.
    pub fn reload(&mut self) -> Result<(), AppError> {
        let categories = self.store.fetch_all_categories()?;
        let records = self.store.fetch_all_records()?;
        self.categories = categories;
        self.ledger = CompletionLedger::from_records(records);
        self.stale = false;
        Ok(())
    }

    /// Whether the in-memory view may lag behind committed writes.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Receive a [`SessionEvent`] after every successful mutation.
    pub fn subscribe(&mut self) -> Receiver<SessionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn opened(&self) {
        self.report(Event::Open, Screen::Main, None);
    }

    pub fn closed(&self) {
        self.report(Event::Close, Screen::Main, None);
    }

    /// Forward a UI event the core does not observe itself.
    pub fn report(&self, event: Event, screen: Screen, item: Option<Item>) {
        self.analytics.report(event, &screen_params(screen, item));
    }

    pub fn compute_visible(&self, query: &VisibleQuery, today: NaiveDate) -> Visible {
        filter::compute_visible(&self.categories, query, &self.ledger, today)
    }

    /// Compute the visible list for the screen, reporting a click when the
    /// filter mode or the selected date changed since the last call.
    pub fn show(&mut self, query: &VisibleQuery, today: NaiveDate) -> Visible {
        if let Some(last) = &self.last_query {
            if last.filter_mode != query.filter_mode {
                self.click(Item::Filter);
            }
            if last.selected_date != query.selected_date {
                self.click(Item::FilterByDate);
            }
        }
        self.last_query = Some(query.clone());
        self.compute_visible(query, today)
    }

    pub fn placeholder(&self, visible: &Visible, search_text: &str) -> Option<Placeholder> {
        filter::placeholder(visible, self.has_trackers(), search_text)
    }

    pub fn compute_statistics(&self) -> Option<Statistics> {
        stats::compute(&self.ledger)
    }

    /// Flip the completion of `id` on `date`. Returns whether it is now completed.
    ///
    /// Completing a day after `today` is ignored and leaves it uncompleted.
    pub fn toggle_completion(
        &mut self,
        id: Uuid,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<bool, AppError> {
        self.refresh_if_stale()?;
        if self.find_tracker(id).is_none() {
            return Err(AppError::NotFound { entity: "Tracker" });
        }

        let record = TrackerRecord::new(id, date);
        let (completed, item) = if self.ledger.is_completed_on(id, date) {
            self.store.delete_record(&record)?;
            self.ledger.remove_completion(id, date);
            (false, Item::TrackerNotCompleted)
        } else if self.ledger.can_record(id, date, today) {
            self.store.create_record(&record)?;
            self.ledger.record_completion(id, date, today);
            (true, Item::TrackerCompleted)
        } else {
            log::warn!("Refusing to complete {id} on {date}: after {today}");
            return Ok(false);
        };

        self.publish(SessionEvent::RecordsChanged);
        self.click(item);
        Ok(completed)
    }

    pub fn toggle_pin(&mut self, id: Uuid) -> Result<Tracker, AppError> {
        self.refresh_if_stale()?;
        let tracker = self
            .find_tracker(id)
            .map(pins::toggle_pin)
            .ok_or(AppError::NotFound { entity: "Tracker" })?;

        self.store.update_tracker(&tracker, None)?;
        self.reload_categories()?;
        self.publish(SessionEvent::CategoriesChanged);
        self.click(if tracker.is_pinned { Item::Pinned } else { Item::Unpinned });
        Ok(tracker)
    }

    /// Titles are unique; the pinned section title is reserved.
    pub fn create_category(&mut self, title: &str) -> Result<(), AppError> {
        self.refresh_if_stale()?;
        let title = validate_category_title(title)?;
        if self.category(title).is_some() {
            return Err(AppError::AlreadyExists {
                name: title.to_string(),
            });
        }

        self.store.create_category(title)?;
        self.reload_categories()?;
        self.publish(SessionEvent::CategoriesChanged);
        Ok(())
    }

    /// Only empty categories can be deleted.
    pub fn delete_category(&mut self, title: &str) -> Result<(), AppError> {
        self.refresh_if_stale()?;
        self.store.delete_category(title)?;
        self.reload_categories()?;
        self.publish(SessionEvent::CategoriesChanged);
        Ok(())
    }

    pub fn create_tracker(&mut self, new: NewTracker) -> Result<Tracker, AppError> {
        self.refresh_if_stale()?;
        let name = validate_tracker_name(&new.name)?;
        let emoji = validate_emoji(&new.emoji)?;
        if self.category(&new.category_title).is_none() {
            return Err(AppError::NotFound { entity: "Category" });
        }

        let tracker = Tracker::new(name, new.color, emoji, new.schedule);
        self.store.create_tracker(&tracker, &new.category_title)?;
        self.reload_categories()?;
        self.publish(SessionEvent::CategoriesChanged);
        self.click(Item::AddTracker);
        Ok(tracker)
    }

    /// Replace the editable fields of `id`, optionally moving it to another category.
    pub fn update_tracker(&mut self, id: Uuid, edit: TrackerEdit) -> Result<Tracker, AppError> {
        self.refresh_if_stale()?;
        let (current_title, existing) = self
            .find_with_category(id)
            .ok_or(AppError::NotFound { entity: "Tracker" })?;
        let name = validate_tracker_name(&edit.name)?;
        let emoji = validate_emoji(&edit.emoji)?;

        let target = match edit.category_title.as_deref() {
            Some(title) if title != current_title => {
                if self.category(title).is_none() {
                    return Err(AppError::NotFound { entity: "Category" });
                }
                Some(title)
            }
            Some(_) | None => None,
        };

        let updated = Tracker {
            id,
            name: name.to_string(),
            color: edit.color,
            emoji: emoji.to_string(),
            schedule: edit.schedule,
            is_pinned: edit.is_pinned.unwrap_or(existing.is_pinned),
        };

        self.store.update_tracker(&updated, target)?;
        self.reload_categories()?;
        self.publish(SessionEvent::CategoriesChanged);
        self.click(Item::UpdateTracker);
        Ok(updated)
    }

    /// Delete the tracker and every completion it owns.
    pub fn delete_tracker(&mut self, id: Uuid) -> Result<(), AppError> {
        self.refresh_if_stale()?;
        self.store.delete_tracker(id)?;
        let removed = self.ledger.remove_tracker(id);
        log::debug!("Dropped {removed} completions of deleted tracker {id}");
        self.reload_categories()?;
        self.publish(SessionEvent::CategoriesChanged);
        self.publish(SessionEvent::RecordsChanged);
        self.click(Item::Delete);
        Ok(())
    }

    /// Re-read categories after a committed write.
    fn reload_categories(&mut self) -> Result<(), AppError> {
        match self.store.fetch_all_categories() {
            Ok(categories) => {
                self.categories = categories;
                Ok(())
            }
            Err(e) => {
                log::error!("Write committed but reload failed: {e}");
                self.stale = true;
                Err(e.into())
            }
        }
    }

    fn refresh_if_stale(&mut self) -> Result<(), AppError> {
        if self.stale {
            log::info!("Reloading stale session");
            self.reload()?;
        }
        Ok(())
    }

    fn category(&self, title: &str) -> Option<&TrackerCategory> {
        self.categories.iter().find(|c| c.title == title)
    }

    fn find_with_category(&self, id: Uuid) -> Option<(&str, &Tracker)> {
        self.categories.iter().find_map(|category| {
            category
                .trackers
                .iter()
                .find(|t| t.id == id)
                .map(|tracker| (category.title.as_str(), tracker))
        })
    }

    fn publish(&mut self, event: SessionEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }

    fn click(&self, item: Item) {
        self.analytics.report(Event::Click, &main_screen_click(item));
    }
}
