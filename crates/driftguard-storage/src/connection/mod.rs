//! Connection management: one write-serialized connection.

pub mod pragmas;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use driftguard_core::errors::StorageError;
use rusqlite::Connection;

use self::pragmas::apply_pragmas;
use crate::migrations;

/// Owns the serialized connection.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl DatabaseManager {
    /// Open a database at the given path, apply pragmas, run migrations.
    pub fn open(path: &Path, busy_timeout_ms: u32) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        apply_pragmas(&conn, busy_timeout_ms)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            writer: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing, or when nothing should persist).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| StorageError::SqliteError {
            message: e.to_string(),
        })?;
        apply_pragmas(&conn, 0)?;
        migrations::run_migrations(&conn)?;
        Ok(Self {
            writer: Mutex::new(conn),
            path: None,
        })
    }

    /// Execute an operation with the serialized connection.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.writer.lock().map_err(|_| StorageError::LockPoisoned {
            resource: "sqlite writer".to_string(),
        })?;
        f(&guard)
    }

    /// Get the database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
