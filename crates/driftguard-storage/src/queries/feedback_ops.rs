//! Raw SQL operations for feedback_log and reference_dataset.

use driftguard_core::errors::StorageError;
use driftguard_core::models::{FeedbackRecord, ReferenceExample};
use rusqlite::{params, Connection};

use super::{parse_timestamp, sql_err};

pub fn insert_feedback(conn: &Connection, record: &FeedbackRecord) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO feedback_log
            (session_id, feedback_type, rating, comment, input_text, output_text, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.session_id,
            record.feedback_type,
            record.rating,
            record.comment,
            record.input_text,
            record.output_text,
            record.timestamp.to_rfc3339(),
        ],
    )
    .map_err(sql_err)?;
    Ok(())
}

/// Newest `limit` records, returned oldest first.
pub fn recent_feedback(conn: &Connection, limit: usize) -> Result<Vec<FeedbackRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT session_id, feedback_type, rating, comment, input_text, output_text, created_at
             FROM feedback_log ORDER BY id DESC LIMIT ?1",
        )
        .map_err(sql_err)?;
    let rows = stmt
        .query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i32>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, String>(6)?,
            ))
        })
        .map_err(sql_err)?;

    let mut out = Vec::new();
    for row in rows {
        let (session_id, feedback_type, rating, comment, input_text, output_text, ts) =
            row.map_err(sql_err)?;
        out.push(FeedbackRecord {
            session_id,
            feedback_type,
            rating,
            comment,
            input_text,
            output_text,
            timestamp: parse_timestamp("feedback_log", &ts)?,
        });
    }
    out.reverse();
    Ok(out)
}

pub fn count_feedback(conn: &Connection) -> Result<u64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM feedback_log", [], |row| row.get::<_, i64>(0))
        .map(|n| n.max(0) as u64)
        .map_err(sql_err)
}

pub fn upsert_reference(conn: &Connection, example: &ReferenceExample) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO reference_dataset
            (session_id, feedback_type, rating, input_text, output_text, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)
         ON CONFLICT(session_id) DO UPDATE SET
            feedback_type = excluded.feedback_type,
            rating = excluded.rating,
            input_text = excluded.input_text,
            output_text = excluded.output_text,
            recorded_at = excluded.recorded_at",
        params![
            example.session_id,
            example.feedback_type,
            example.rating,
            example.input_text,
            example.output_text,
            example.recorded_at.to_rfc3339(),
        ],
    )
    .map_err(sql_err)?;
    Ok(())
}

pub fn reference_dataset(conn: &Connection) -> Result<Vec<ReferenceExample>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT session_id, feedback_type, rating, input_text, output_text, recorded_at
             FROM reference_dataset ORDER BY session_id",
        )
        .map_err(sql_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i32>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .map_err(sql_err)?;

    let mut out = Vec::new();
    for row in rows {
        let (session_id, feedback_type, rating, input_text, output_text, ts) =
            row.map_err(sql_err)?;
        out.push(ReferenceExample {
            session_id,
            input_text,
            output_text,
            rating,
            feedback_type,
            recorded_at: parse_timestamp("reference_dataset", &ts)?,
        });
    }
    Ok(out)
}
