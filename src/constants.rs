// src/constants.rs

/// Maximum tracker name length, in characters
pub const MAX_TRACKER_NAME_LEN: usize = 38;

/// Maximum category title length, in characters
pub const MAX_CATEGORY_TITLE_LEN: usize = 100;

/// Maximum emoji field length, in characters (covers ZWJ sequences)
pub const MAX_EMOJI_LEN: usize = 16;

/// Title of the synthetic category that collects pinned trackers.
/// Never persisted; reserved at category creation time.
pub const PINNED_CATEGORY_TITLE: &str = "Pinned";

/// Upper bound for a single host protocol message, in bytes
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// SQLite file name inside the data directory
pub const DB_FILE_NAME: &str = "habits.db";

/// Environment variable overriding the database path
pub const DB_PATH_ENV: &str = "HABIT_TRACKER_DB";

/// Environment variable overriding the default log level
pub const LOG_LEVEL_ENV: &str = "HABIT_TRACKER_LOG";
