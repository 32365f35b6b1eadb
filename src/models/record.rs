use crate::models::tracker::conversion_error;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The fact that a tracker was marked done on a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackerRecord {
    pub tracker_id: Uuid,
    /// Day granularity; time of day never takes part in comparisons.
    pub date: NaiveDate,
}

impl TrackerRecord {
    pub fn new(tracker_id: Uuid, date: NaiveDate) -> Self {
        Self { tracker_id, date }
    }

    /// Insert the record. Returns false if the same (tracker, day) pair was
    /// already stored.
    pub fn insert(&self, conn: &Connection) -> Result<bool> {
        let rows_affected = conn.execute(
            "INSERT OR IGNORE INTO tracker_records (tracker_id, day) VALUES (?1, ?2)",
            params![self.tracker_id.to_string(), self.date.to_string()],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete the record for this (tracker, day) pair.
    /// Returns false if it did not exist.
    pub fn delete(&self, conn: &Connection) -> Result<bool> {
        let rows_affected = conn.execute(
            "DELETE FROM tracker_records WHERE tracker_id = ?1 AND day = ?2",
            params![self.tracker_id.to_string(), self.date.to_string()],
        )?;
        Ok(rows_affected > 0)
    }

    pub fn find_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt =
            conn.prepare("SELECT tracker_id, day FROM tracker_records ORDER BY day, rowid")?;
        let rows = stmt.query_map([], |row| {
            let tracker_id: String = row.get(0)?;
            let day: String = row.get(1)?;
            Ok(Self {
                tracker_id: Uuid::parse_str(&tracker_id).map_err(|e| conversion_error(0, e))?,
                date: day.parse().map_err(|e| conversion_error(1, e))?,
            })
        })?;

        rows.collect()
    }
}
