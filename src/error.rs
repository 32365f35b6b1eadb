use thiserror::Error;

/// Failure of a single persistence operation.
///
/// Every store call reports one of these kinds; nothing is swallowed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write: {operation}")]
    WriteFailed { operation: String },

    #[error("Failed to read: {operation}")]
    ReadFailed { operation: String },

    #[error("Failed to decode {field}: {reason}")]
    DecodeFailed { field: &'static str, reason: String },

    #[error("{entity} not found")]
    EntityNotFound { entity: &'static str },

    #[error("Cannot delete: {reason}")]
    DeleteFailed { reason: String },

    #[error("Cannot update: {reason}")]
    UpdateFailed { reason: String },
}

impl StoreError {
    pub fn write(operation: &str, e: &rusqlite::Error) -> Self {
        log::error!("Failed to {operation}: {e}");
        Self::WriteFailed {
            operation: operation.to_string(),
        }
    }

    pub fn read(operation: &str, e: &rusqlite::Error) -> Self {
        log::error!("Failed to {operation}: {e}");
        Self::ReadFailed {
            operation: operation.to_string(),
        }
    }

    pub fn delete(operation: &str, e: &rusqlite::Error) -> Self {
        log::error!("Failed to {operation}: {e}");
        Self::DeleteFailed {
            reason: e.to_string(),
        }
    }

    pub fn update(operation: &str, e: &rusqlite::Error) -> Self {
        log::error!("Failed to {operation}: {e}");
        Self::UpdateFailed {
            reason: e.to_string(),
        }
    }
}

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("'{name}' already exists")]
    AlreadyExists { name: String },

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

// For host responses - converts AppError to String
impl From<AppError> for String {
    fn from(e: AppError) -> Self {
        e.to_string()
    }
}

/// Check if a rusqlite error is a UNIQUE or PRIMARY KEY constraint violation
pub fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(e, rusqlite::Error::SqliteFailure(err, _)
        if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
}

/// Check if a rusqlite error is a FOREIGN KEY constraint violation
pub fn is_fk_violation(e: &rusqlite::Error) -> bool {
    matches!(e, rusqlite::Error::SqliteFailure(err, _)
        if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY)
}
