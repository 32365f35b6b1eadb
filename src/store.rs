//! Persistence boundary.
//!
//! The session only ever talks to a [`TrackerStore`]; [`SqliteStore`] is the
//! local-database implementation. Every operation reports failure as a
//! [`StoreError`] and none of them retries or swallows errors.

use crate::db::{migrations, with_connection, Database};
use crate::error::{is_fk_violation, is_unique_violation, StoreError};
use crate::models::{Tracker, TrackerCategory, TrackerRecord};
use std::path::Path;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub trait TrackerStore {
    /// Categories sorted by title, each with its trackers in insertion order.
    fn fetch_all_categories(&self) -> Result<Vec<TrackerCategory>, StoreError>;
    fn create_category(&self, title: &str) -> Result<(), StoreError>;
    fn delete_category(&self, title: &str) -> Result<(), StoreError>;

    fn fetch_all_trackers(&self) -> Result<Vec<Tracker>, StoreError>;
    fn create_tracker(&self, tracker: &Tracker, category_title: &str) -> Result<(), StoreError>;
    /// Full replacement keyed by `tracker.id`, optionally moving it to
    /// `category_title`. Either all of it is stored or none of it.
    fn update_tracker(
        &self,
        tracker: &Tracker,
        category_title: Option<&str>,
    ) -> Result<(), StoreError>;
    /// Removes the tracker and every completion record it owns.
    fn delete_tracker(&self, id: Uuid) -> Result<(), StoreError>;

    fn fetch_all_records(&self) -> Result<Vec<TrackerRecord>, StoreError>;
    /// Stores the record; an identical existing record is left as is.
    fn create_record(&self, record: &TrackerRecord) -> Result<(), StoreError>;
    fn delete_record(&self, record: &TrackerRecord) -> Result<(), StoreError>;
}

/// SQLite-backed store. Cloning shares the same connection.
#[derive(Clone)]
pub struct SqliteStore {
    db: Arc<Mutex<Database>>,
}

impl SqliteStore {
    pub fn new(db: Arc<Mutex<Database>>) -> Self {
        Self { db }
    }

    /// Open (or create) the database file and bring its schema up to date.
    pub fn open(path: &Path) -> rusqlite::Result<Self> {
        let db = Database::open(path)?;
        migrations::run(db.connection())?;
        log::info!("Opened tracker database at {}", path.display());
        Ok(Self::new(Arc::new(Mutex::new(db))))
    }

    /// Create an in-memory database (for tests and previews).
    pub fn open_in_memory() -> rusqlite::Result<Self> {
        let db = Database::open_in_memory()?;
        migrations::run(db.connection())?;
        Ok(Self::new(Arc::new(Mutex::new(db))))
    }

    pub fn database(&self) -> &Arc<Mutex<Database>> {
        &self.db
    }
}

impl TrackerStore for SqliteStore {
    fn fetch_all_categories(&self) -> Result<Vec<TrackerCategory>, StoreError> {
        with_connection(&self.db, "load categories", StoreError::read, TrackerCategory::find_all)
    }

    fn create_category(&self, title: &str) -> Result<(), StoreError> {
        with_connection(
            &self.db,
            "create category",
            |operation, e| {
                if is_unique_violation(e) {
                    log::warn!("Category '{title}' already exists");
                    return StoreError::WriteFailed {
                        operation: format!("{operation}: '{title}' already exists"),
                    };
                }
                StoreError::write(operation, e)
            },
            |conn| TrackerCategory::create(conn, title),
        )?;
        log::info!("Created category '{title}'");
        Ok(())
    }

    fn delete_category(&self, title: &str) -> Result<(), StoreError> {
        let deleted = with_connection(
            &self.db,
            "delete category",
            |operation, e| {
                if is_fk_violation(e) {
                    log::warn!("Refusing to {operation} '{title}': it still has trackers");
                    StoreError::DeleteFailed {
                        reason: "category still has trackers".into(),
                    }
                } else {
                    StoreError::delete(operation, e)
                }
            },
            |conn| TrackerCategory::delete(conn, title),
        )?;

        if !deleted {
            return Err(StoreError::EntityNotFound { entity: "Category" });
        }
        log::info!("Deleted category '{title}'");
        Ok(())
    }

    fn fetch_all_trackers(&self) -> Result<Vec<Tracker>, StoreError> {
        with_connection(&self.db, "load trackers", StoreError::read, Tracker::find_all)
    }

    fn create_tracker(&self, tracker: &Tracker, category_title: &str) -> Result<(), StoreError> {
        let inserted = with_connection(&self.db, "create tracker", StoreError::write, |conn| {
            let Some(category_id) = TrackerCategory::find_id_by_title(conn, category_title)? else {
                return Ok(false);
            };
            tracker.insert(conn, category_id)?;
            Ok(true)
        })?;

        if !inserted {
            return Err(StoreError::EntityNotFound { entity: "Category" });
        }
        log::info!("Created tracker {} in '{category_title}'", tracker.id);
        Ok(())
    }

    fn update_tracker(
        &self,
        tracker: &Tracker,
        category_title: Option<&str>,
    ) -> Result<(), StoreError> {
        // Dropping the transaction without commit rolls every statement back.
        let missing = with_connection(&self.db, "update tracker", StoreError::update, |conn| {
            let tx = conn.unchecked_transaction()?;
            let category_id = match category_title {
                Some(title) => match TrackerCategory::find_id_by_title(&tx, title)? {
                    Some(id) => Some(id),
                    None => return Ok(Some("Category")),
                },
                None => None,
            };
            if !tracker.update(&tx)? {
                return Ok(Some("Tracker"));
            }
            if let Some(category_id) = category_id {
                Tracker::move_to_category(&tx, tracker.id, category_id)?;
            }
            tx.commit()?;
            Ok(None)
        })?;

        if let Some(entity) = missing {
            return Err(StoreError::EntityNotFound { entity });
        }
        if let Some(title) = category_title {
            log::info!("Moved tracker {} to '{title}'", tracker.id);
        }
        Ok(())
    }

    fn delete_tracker(&self, id: Uuid) -> Result<(), StoreError> {
        let deleted = with_connection(&self.db, "delete tracker", StoreError::delete, |conn| {
            Tracker::delete(conn, id)
        })?;

        if !deleted {
            return Err(StoreError::EntityNotFound { entity: "Tracker" });
        }
        log::info!("Deleted tracker {id} and its records");
        Ok(())
    }

    fn fetch_all_records(&self) -> Result<Vec<TrackerRecord>, StoreError> {
        with_connection(&self.db, "load records", StoreError::read, TrackerRecord::find_all)
    }

    fn create_record(&self, record: &TrackerRecord) -> Result<(), StoreError> {
        with_connection(&self.db, "create record", StoreError::write, |conn| record.insert(conn))?;
        Ok(())
    }

    fn delete_record(&self, record: &TrackerRecord) -> Result<(), StoreError> {
        let deleted = with_connection(&self.db, "delete record", StoreError::delete, |conn| {
            record.delete(conn)
        })?;

        if !deleted {
            return Err(StoreError::EntityNotFound { entity: "Record" });
        }
        Ok(())
    }
}
