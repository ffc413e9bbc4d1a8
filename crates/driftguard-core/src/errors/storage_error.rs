use super::error_code::{self, DriftGuardErrorCode};

/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("corrupt row in {table}: {message}")]
    CorruptRow { table: String, message: String },

    #[error("lock poisoned: {resource}")]
    LockPoisoned { resource: String },
}

impl DriftGuardErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        error_code::STORAGE_ERROR
    }
}
