use crate::models::Rgba;
use crate::schedule::{self, Schedule};
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Result, Row};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A habit (weekly schedule) or an irregular event (no schedule).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracker {
    pub id: Uuid,
    pub name: String,
    pub color: Rgba,
    pub emoji: String,
    /// `None` marks an irregular event.
    pub schedule: Option<Schedule>,
    pub is_pinned: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerKind {
    Habit,
    IrregularEvent,
}

const TRACKER_COLUMNS: &str = "t.id, t.name, t.color, t.emoji, t.schedule, t.is_pinned";

impl Tracker {
    /// Create a new, unpinned tracker (not yet saved to database).
    pub fn new(name: &str, color: Rgba, emoji: &str, schedule: Option<Schedule>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            color,
            emoji: emoji.to_string(),
            schedule,
            is_pinned: false,
        }
    }

    pub fn kind(&self) -> TrackerKind {
        if self.schedule.is_some() {
            TrackerKind::Habit
        } else {
            TrackerKind::IrregularEvent
        }
    }

    pub fn is_due(&self, date: NaiveDate) -> bool {
        schedule::is_due(self, date)
    }

    /// Decode a row selected with `TRACKER_COLUMNS` starting at column `offset`.
    fn from_row(row: &Row<'_>, offset: usize) -> Result<Self> {
        let id: String = row.get(offset)?;
        let color: String = row.get(offset + 2)?;
        let schedule: Option<String> = row.get(offset + 4)?;

        Ok(Self {
            id: Uuid::parse_str(&id).map_err(|e| conversion_error(offset, e))?,
            name: row.get(offset + 1)?,
            color: color.parse().map_err(|e| conversion_error(offset + 2, e))?,
            emoji: row.get(offset + 3)?,
            schedule: schedule
                .map(|s| Schedule::parse(&s))
                .transpose()
                .map_err(|e| conversion_error(offset + 4, e))?,
            is_pinned: row.get::<_, i32>(offset + 5)? != 0,
        })
    }

    /// Save the tracker into the given category.
    pub fn insert(&self, conn: &Connection, category_id: i64) -> Result<()> {
        conn.execute(
            "INSERT INTO trackers (id, category_id, name, color, emoji, schedule, is_pinned)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                self.id.to_string(),
                category_id,
                self.name,
                self.color.to_hex(),
                self.emoji,
                self.schedule.as_ref().map(Schedule::to_storage),
                i32::from(self.is_pinned),
            ],
        )?;
        Ok(())
    }

    /// Replace every stored field of the tracker with the same id.
    /// Returns false if no such tracker exists.
    pub fn update(&self, conn: &Connection) -> Result<bool> {
        let rows_affected = conn.execute(
            "UPDATE trackers
             SET name = ?1, color = ?2, emoji = ?3, schedule = ?4, is_pinned = ?5
             WHERE id = ?6",
            params![
                self.name,
                self.color.to_hex(),
                self.emoji,
                self.schedule.as_ref().map(Schedule::to_storage),
                i32::from(self.is_pinned),
                self.id.to_string(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Move a tracker to another category, keeping its identity and records.
    pub fn move_to_category(conn: &Connection, id: Uuid, category_id: i64) -> Result<bool> {
        let rows_affected = conn.execute(
            "UPDATE trackers SET category_id = ?1 WHERE id = ?2",
            params![category_id, id.to_string()],
        )?;
        Ok(rows_affected > 0)
    }

    /// All trackers in insertion order.
    pub fn find_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {TRACKER_COLUMNS} FROM trackers t ORDER BY t.rowid"
        ))?;
        let rows = stmt.query_map([], |row| Self::from_row(row, 0))?;
        rows.collect()
    }

    /// All trackers paired with their category id, in insertion order.
    pub fn find_all_with_category(conn: &Connection) -> Result<Vec<(i64, Self)>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT t.category_id, {TRACKER_COLUMNS} FROM trackers t ORDER BY t.rowid"
        ))?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, Self::from_row(row, 1)?)))?;
        rows.collect()
    }

    /// Delete a tracker together with all of its completion records.
    /// Returns false if the tracker did not exist.
    pub fn delete(conn: &Connection, id: Uuid) -> Result<bool> {
        let tx = conn.unchecked_transaction()?;
        tx.execute(
            "DELETE FROM tracker_records WHERE tracker_id = ?1",
            params![id.to_string()],
        )?;
        let rows_affected = tx.execute("DELETE FROM trackers WHERE id = ?1", params![id.to_string()])?;
        tx.commit()?;
        Ok(rows_affected > 0)
    }
}

pub(crate) fn conversion_error<E>(column: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TrackerCategory, TrackerRecord};
    use crate::test_utils::setup_test_db;

    fn find(conn: &Connection, id: Uuid) -> Option<Tracker> {
        Tracker::find_all(conn).unwrap().into_iter().find(|t| t.id == id)
    }

    fn habit(name: &str) -> Tracker {
        Tracker::new(name, Rgba::PALETTE[2], "🏃", Some(Schedule::parse("1,3,5").unwrap()))
    }

    #[test]
    fn test_new_creates_unpinned_tracker() {
        let tracker = habit("Run");
        assert_eq!(tracker.name, "Run");
        assert!(!tracker.is_pinned);
        assert_eq!(tracker.kind(), TrackerKind::Habit);

        let event = Tracker::new("Dentist", Rgba::PALETTE[0], "🦷", None);
        assert_eq!(event.kind(), TrackerKind::IrregularEvent);
        assert_ne!(tracker.id, event.id);
    }

    #[test]
    fn test_insert_and_find() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let category_id = TrackerCategory::create(conn, "Health").unwrap();

        let tracker = habit("Run");
        tracker.insert(conn, category_id).unwrap();

        let found = find(conn, tracker.id);
        assert_eq!(found, Some(tracker));

        let not_found = find(conn, Uuid::new_v4());
        assert!(not_found.is_none());
    }

    #[test]
    fn test_irregular_event_round_trips_null_schedule() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let category_id = TrackerCategory::create(conn, "Errands").unwrap();

        let event = Tracker::new("Dentist", Rgba::PALETTE[0], "🦷", None);
        event.insert(conn, category_id).unwrap();

        let found = find(conn, event.id).unwrap();
        assert!(found.schedule.is_none());
    }

    #[test]
    fn test_find_all_preserves_insertion_order() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let category_id = TrackerCategory::create(conn, "Health").unwrap();

        for name in ["Zumba", "Apples", "Meditate"] {
            habit(name).insert(conn, category_id).unwrap();
        }

        let names: Vec<_> = Tracker::find_all(conn)
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["Zumba", "Apples", "Meditate"]);
    }

    #[test]
    fn test_update_replaces_fields() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let category_id = TrackerCategory::create(conn, "Health").unwrap();

        let mut tracker = habit("Run");
        tracker.insert(conn, category_id).unwrap();

        tracker.name = "Run 5k".to_string();
        tracker.schedule = None;
        tracker.is_pinned = true;
        assert!(tracker.update(conn).unwrap());

        let found = find(conn, tracker.id).unwrap();
        assert_eq!(found, tracker);

        // Updating a tracker that was never saved affects nothing
        assert!(!habit("Ghost").update(conn).unwrap());
    }

    #[test]
    fn test_delete_removes_records() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let category_id = TrackerCategory::create(conn, "Health").unwrap();

        let tracker = habit("Run");
        tracker.insert(conn, category_id).unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        TrackerRecord::new(tracker.id, day).insert(conn).unwrap();

        assert!(Tracker::delete(conn, tracker.id).unwrap());
        assert!(find(conn, tracker.id).is_none());
        assert!(TrackerRecord::find_all(conn).unwrap().is_empty());

        // Deleting non-existent should return false
        assert!(!Tracker::delete(conn, tracker.id).unwrap());
    }

    #[test]
    fn test_corrupt_color_is_a_conversion_error() {
        let (db, _dir) = setup_test_db();
        let conn = db.connection();
        let category_id = TrackerCategory::create(conn, "Health").unwrap();
        conn.execute(
            "INSERT INTO trackers (id, category_id, name, color, emoji, schedule, is_pinned)
             VALUES (?1, ?2, 'Bad', 'not-a-color', '?', NULL, 0)",
            params![Uuid::new_v4().to_string(), category_id],
        )
        .unwrap();

        let err = Tracker::find_all(conn).unwrap_err();
        assert!(matches!(err, rusqlite::Error::FromSqlConversionFailure(2, _, _)));
    }
}
