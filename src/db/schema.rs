pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS trackers (
    id TEXT PRIMARY KEY,
    category_id INTEGER NOT NULL REFERENCES categories(id),
    name TEXT NOT NULL,
    color TEXT NOT NULL,
    emoji TEXT NOT NULL,
    schedule TEXT,
    is_pinned INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS tracker_records (
    tracker_id TEXT NOT NULL REFERENCES trackers(id) ON DELETE CASCADE,
    day TEXT NOT NULL,
    PRIMARY KEY (tracker_id, day)
);

CREATE INDEX IF NOT EXISTS idx_trackers_category ON trackers(category_id);
CREATE INDEX IF NOT EXISTS idx_tracker_records_day ON tracker_records(day);
"#;
