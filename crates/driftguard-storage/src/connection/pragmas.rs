//! PRAGMA configuration applied to every SQLite connection.

use driftguard_core::errors::StorageError;
use rusqlite::Connection;

/// Apply performance and safety pragmas.
///
/// WAL is requested unconditionally; in-memory databases silently keep
/// their `memory` journal mode.
pub fn apply_pragmas(conn: &Connection, busy_timeout_ms: u32) -> Result<(), StorageError> {
    conn.execute_batch(&format!(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA foreign_keys = ON;
        PRAGMA busy_timeout = {busy_timeout_ms};
        "
    ))
    .map_err(|e| StorageError::SqliteError {
        message: format!("failed to apply pragmas: {e}"),
    })
}

/// Verify that WAL mode is active on a connection.
pub fn verify_wal_mode(conn: &Connection) -> Result<bool, StorageError> {
    let mode: String = conn
        .pragma_query_value(None, "journal_mode", |row| row.get(0))
        .map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
    Ok(mode.eq_ignore_ascii_case("wal"))
}
