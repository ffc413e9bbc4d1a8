//! Raw SQL operations for the append-only alert_log table.
//! Alerts are stored as JSON payloads.

use driftguard_core::errors::StorageError;
use driftguard_core::models::AlertEvent;
use rusqlite::{params, Connection};

use super::sql_err;

pub fn insert_alert(conn: &Connection, alert: &AlertEvent) -> Result<(), StorageError> {
    let payload = serde_json::to_string(alert).map_err(|e| StorageError::SqliteError {
        message: format!("serialize alert: {e}"),
    })?;
    conn.execute(
        "INSERT INTO alert_log (id, kind, severity, metric, payload, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            alert.id,
            alert.kind.as_str(),
            alert.severity.as_str(),
            alert.metric,
            payload,
            alert.timestamp.to_rfc3339(),
        ],
    )
    .map_err(sql_err)?;
    Ok(())
}

/// Newest `limit` alerts, returned oldest first.
pub fn recent_alerts(conn: &Connection, limit: usize) -> Result<Vec<AlertEvent>, StorageError> {
    let mut stmt = conn
        .prepare_cached("SELECT payload FROM alert_log ORDER BY seq DESC LIMIT ?1")
        .map_err(sql_err)?;
    let rows = stmt
        .query_map(params![limit as i64], |row| row.get::<_, String>(0))
        .map_err(sql_err)?;

    let mut out = Vec::new();
    for row in rows {
        let payload = row.map_err(sql_err)?;
        let alert: AlertEvent =
            serde_json::from_str(&payload).map_err(|e| StorageError::CorruptRow {
                table: "alert_log".to_string(),
                message: e.to_string(),
            })?;
        out.push(alert);
    }
    out.reverse();
    Ok(out)
}
