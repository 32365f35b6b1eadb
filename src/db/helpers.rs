// src/db/helpers.rs

use crate::db::Database;
use crate::error::StoreError;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// Lock the shared database, recovering from poisoning if necessary.
///
/// A panic while holding the lock cannot leave SQLite itself inconsistent,
/// so the guard is still usable.
pub fn lock_db(db: &Arc<Mutex<Database>>) -> MutexGuard<'_, Database> {
    match db.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            log::warn!("Database mutex was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}

/// Execute a database operation with lock handling and error mapping.
///
/// `map_err` turns the rusqlite error into the storage error kind that fits
/// the operation (read, write, delete, update).
///
/// # Example
/// ```ignore
/// with_connection(&db, "load categories", StoreError::read, |conn| {
///     TrackerCategory::find_all(conn)
/// })
/// ```
pub fn with_connection<F, T, M>(
    db: &Arc<Mutex<Database>>,
    operation: &str,
    map_err: M,
    f: F,
) -> Result<T, StoreError>
where
    F: FnOnce(&Connection) -> rusqlite::Result<T>,
    M: FnOnce(&str, &rusqlite::Error) -> StoreError,
{
    let db = lock_db(db);
    f(db.connection()).map_err(|e| {
        if let rusqlite::Error::FromSqlConversionFailure(column, _, source) = &e {
            log::error!("Failed to {operation}: column {column}: {source}");
            return StoreError::DecodeFailed {
                field: "row",
                reason: format!("column {column}: {source}"),
            };
        }
        map_err(operation, &e)
    })
}
