//! Runtime configuration resolved from the environment.

use crate::constants::{DB_FILE_NAME, DB_PATH_ENV, LOG_LEVEL_ENV};
use crate::error::AppError;
use directories::ProjectDirs;
use std::path::PathBuf;

const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve using `lookup` in place of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let db_path = match lookup(DB_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };
        let log_level = lookup(LOG_LEVEL_ENV)
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self { db_path, log_level })
    }
}

/// Get the database path, creating the data directory if needed.
fn default_db_path() -> Result<PathBuf, AppError> {
    let proj_dirs = ProjectDirs::from("com", "habittracker", "HabitTracker").ok_or_else(|| {
        AppError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine project directories",
        ))
    })?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)?;
    Ok(data_dir.join(DB_FILE_NAME))
}
