//! Raw SQL operations for the thresholds table.

use chrono::{DateTime, Utc};
use driftguard_core::errors::StorageError;
use rusqlite::{params, Connection};

use super::sql_err;

/// Insert or replace one threshold value.
pub fn upsert_threshold(
    conn: &Connection,
    name: &str,
    value: f64,
    at: DateTime<Utc>,
) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO thresholds (name, value, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(name) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        params![name, value, at.to_rfc3339()],
    )
    .map_err(sql_err)?;
    Ok(())
}

/// All persisted `(name, value)` pairs.
pub fn load_thresholds(conn: &Connection) -> Result<Vec<(String, f64)>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT name, value FROM thresholds ORDER BY name")
        .map_err(sql_err)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?)))
        .map_err(sql_err)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(sql_err)
}
