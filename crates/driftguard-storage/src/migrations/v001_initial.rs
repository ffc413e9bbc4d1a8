//! v001: thresholds, baseline, feedback log, reference dataset, alert log.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS thresholds (
    name TEXT PRIMARY KEY,
    value REAL NOT NULL,
    updated_at TEXT NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS baseline_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    created_at TEXT NOT NULL,
    dimensions INTEGER NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS baseline_samples (
    kind TEXT NOT NULL,
    position INTEGER NOT NULL,
    text TEXT NOT NULL,
    embedding BLOB NOT NULL,
    PRIMARY KEY (kind, position)
) STRICT;

CREATE TABLE IF NOT EXISTS feedback_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL,
    feedback_type TEXT NOT NULL,
    rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    comment TEXT,
    input_text TEXT,
    output_text TEXT,
    created_at TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_feedback_type ON feedback_log(feedback_type);

CREATE TABLE IF NOT EXISTS reference_dataset (
    session_id TEXT PRIMARY KEY,
    feedback_type TEXT NOT NULL,
    rating INTEGER NOT NULL,
    input_text TEXT,
    output_text TEXT,
    recorded_at TEXT NOT NULL
) STRICT;

CREATE TABLE IF NOT EXISTS alert_log (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL,
    kind TEXT NOT NULL,
    severity TEXT NOT NULL,
    metric TEXT NOT NULL,
    payload TEXT NOT NULL,
    created_at TEXT NOT NULL
) STRICT;
"#;
