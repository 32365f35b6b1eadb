use super::schema::SCHEMA;
use rusqlite::{Connection, Result};

/// Create any missing tables. Safe to run on every start.
pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    log::debug!("Database schema is up to date");
    Ok(())
}
