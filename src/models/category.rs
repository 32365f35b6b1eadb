use crate::models::Tracker;
use rusqlite::{params, Connection, OptionalExtension, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A titled group of trackers. The title is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerCategory {
    pub title: String,
    pub trackers: Vec<Tracker>,
}

impl TrackerCategory {
    pub fn new(title: &str, trackers: Vec<Tracker>) -> Self {
        Self {
            title: title.to_string(),
            trackers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    /// All categories sorted by title (case-insensitive), each with its
    /// trackers in insertion order.
    pub fn find_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt =
            conn.prepare("SELECT id, title FROM categories ORDER BY title COLLATE NOCASE, id")?;
        let categories = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<Vec<_>>>()?;

        let mut by_category: HashMap<i64, Vec<Tracker>> = HashMap::new();
        for (category_id, tracker) in Tracker::find_all_with_category(conn)? {
            by_category.entry(category_id).or_default().push(tracker);
        }

        Ok(categories
            .into_iter()
            .map(|(id, title)| Self {
                title,
                trackers: by_category.remove(&id).unwrap_or_default(),
            })
            .collect())
    }

    /// Row id of the category with this exact title.
    pub fn find_id_by_title(conn: &Connection, title: &str) -> Result<Option<i64>> {
        conn.query_row(
            "SELECT id FROM categories WHERE title = ?1",
            params![title],
            |row| row.get(0),
        )
        .optional()
    }

    /// Create a new, empty category and return its row id.
    pub fn create(conn: &Connection, title: &str) -> Result<i64> {
        conn.execute("INSERT INTO categories (title) VALUES (?1)", params![title])?;
        Ok(conn.last_insert_rowid())
    }

    /// Delete a category by title. Fails with a foreign key violation while
    /// trackers still reference it. Returns false if no such category exists.
    pub fn delete(conn: &Connection, title: &str) -> Result<bool> {
        let rows_affected = conn.execute("DELETE FROM categories WHERE title = ?1", params![title])?;
        Ok(rows_affected > 0)
    }
}
