//! Raw SQL operations for the baseline tables.
//!
//! Embeddings are stored as little-endian `f32` blobs.

use driftguard_core::errors::StorageError;
use driftguard_core::models::{Baseline, BaselineSample, SampleKind};
use rusqlite::{params, Connection, OptionalExtension};

use super::{parse_timestamp, sql_err};
use crate::connection::writer::with_immediate_transaction;

pub fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|v| v.to_le_bytes()).collect()
}

pub fn decode_embedding(bytes: &[u8]) -> Result<Vec<f32>, StorageError> {
    if bytes.len() % 4 != 0 {
        return Err(StorageError::CorruptRow {
            table: "baseline_samples".to_string(),
            message: format!("embedding blob length {} is not a multiple of 4", bytes.len()),
        });
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Replace the stored baseline in one transaction.
pub fn replace_baseline(conn: &Connection, baseline: &Baseline) -> Result<(), StorageError> {
    with_immediate_transaction(conn, |tx| {
        tx.execute("DELETE FROM baseline_samples", []).map_err(sql_err)?;
        tx.execute(
            "INSERT INTO baseline_meta (id, created_at, dimensions) VALUES (1, ?1, ?2)
             ON CONFLICT(id) DO UPDATE SET created_at = excluded.created_at,
                                           dimensions = excluded.dimensions",
            params![baseline.created_at.to_rfc3339(), baseline.dimensions as i64],
        )
        .map_err(sql_err)?;

        let mut stmt = tx
            .prepare_cached(
                "INSERT INTO baseline_samples (kind, position, text, embedding)
                 VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(sql_err)?;
        for kind in [SampleKind::Response, SampleKind::Input] {
            for (position, sample) in baseline.samples(kind).iter().enumerate() {
                stmt.execute(params![
                    kind.as_str(),
                    position as i64,
                    sample.text,
                    encode_embedding(&sample.embedding),
                ])
                .map_err(sql_err)?;
            }
        }
        Ok(())
    })
}

pub fn delete_baseline(conn: &Connection) -> Result<(), StorageError> {
    with_immediate_transaction(conn, |tx| {
        tx.execute("DELETE FROM baseline_samples", []).map_err(sql_err)?;
        tx.execute("DELETE FROM baseline_meta", []).map_err(sql_err)?;
        Ok(())
    })
}

pub fn load_baseline(conn: &Connection) -> Result<Option<Baseline>, StorageError> {
    let meta: Option<(String, i64)> = conn
        .query_row(
            "SELECT created_at, dimensions FROM baseline_meta WHERE id = 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()
        .map_err(sql_err)?;
    let Some((created_at, dimensions)) = meta else {
        return Ok(None);
    };
    let created_at = parse_timestamp("baseline_meta", &created_at)?;

    let mut stmt = conn
        .prepare_cached(
            "SELECT kind, text, embedding FROM baseline_samples ORDER BY kind, position",
        )
        .map_err(sql_err)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Vec<u8>>(2)?,
            ))
        })
        .map_err(sql_err)?;

    let mut responses = Vec::new();
    let mut inputs = Vec::new();
    for row in rows {
        let (kind, text, blob) = row.map_err(sql_err)?;
        let sample = BaselineSample {
            text,
            embedding: decode_embedding(&blob)?,
        };
        match SampleKind::from_str_name(&kind) {
            Some(SampleKind::Response) => responses.push(sample),
            Some(SampleKind::Input) => inputs.push(sample),
            None => {
                return Err(StorageError::CorruptRow {
                    table: "baseline_samples".to_string(),
                    message: format!("unknown sample kind {kind:?}"),
                })
            }
        }
    }

    Ok(Some(Baseline::new(
        responses,
        inputs,
        dimensions.max(0) as usize,
        created_at,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedding_blob_round_trip() {
        let v = vec![0.25_f32, -1.5, 3.0e-7, 0.0];
        assert_eq!(decode_embedding(&encode_embedding(&v)).unwrap(), v);
    }

    #[test]
    fn truncated_blob_is_corrupt() {
        assert!(matches!(
            decode_embedding(&[0, 0, 0]),
            Err(StorageError::CorruptRow { .. })
        ));
    }
}
