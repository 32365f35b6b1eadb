pub mod analytics;
pub mod commands;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod filter;
pub mod host;
pub mod ledger;
pub mod models;
pub mod pins;
pub mod schedule;
pub mod session;
pub mod stats;
pub mod store;
#[cfg(test)]
mod test_utils;
pub mod validation;

use crate::config::AppConfig;
use crate::db::{migrations, Database};
use crate::error::AppError;
use crate::session::TrackerSession;
use crate::store::SqliteStore;
use log::{error, info};
use std::sync::{Arc, Mutex};

/// Error type for start-up failures
#[derive(Debug)]
pub enum InitError {
    DatabaseOpen(rusqlite::Error),
    Migration(rusqlite::Error),
    Load(AppError),
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitError::DatabaseOpen(e) => write!(f, "Failed to open database: {e}"),
            InitError::Migration(e) => write!(f, "Failed to run database migrations: {e}"),
            InitError::Load(e) => write!(f, "Failed to load trackers: {e}"),
        }
    }
}

impl std::error::Error for InitError {}

/// Open the configured database and load a session over it.
pub fn open_session(config: &AppConfig) -> Result<TrackerSession<SqliteStore>, InitError> {
    let db = Database::open(&config.db_path).map_err(|e| {
        error!("Failed to open database at {}: {e}", config.db_path.display());
        InitError::DatabaseOpen(e)
    })?;

    migrations::run(db.connection()).map_err(|e| {
        error!("Failed to run migrations: {e}");
        InitError::Migration(e)
    })?;

    let store = SqliteStore::new(Arc::new(Mutex::new(db)));
    let session = TrackerSession::new(store).map_err(InitError::Load)?;
    info!(
        "Loaded {} categories from {}",
        session.categories().len(),
        config.db_path.display()
    );
    Ok(session)
}
