//! Raw SQL operations, one module per table group.

pub mod alert_ops;
pub mod baseline_ops;
pub mod feedback_ops;
pub mod threshold_ops;

use chrono::{DateTime, Utc};
use driftguard_core::errors::StorageError;

pub(crate) fn sql_err(e: rusqlite::Error) -> StorageError {
    StorageError::SqliteError {
        message: e.to_string(),
    }
}

pub(crate) fn parse_timestamp(table: &str, raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::CorruptRow {
            table: table.to_string(),
            message: format!("bad timestamp {raw:?}: {e}"),
        })
}
