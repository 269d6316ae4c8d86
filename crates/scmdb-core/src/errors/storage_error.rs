//! Storage-layer errors for SQLite operations.

use super::error_code::{self, ScmdbErrorCode};

/// Errors raised by the script history store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("database busy: {message}")]
    Busy { message: String },

    #[error("migration failed at version {version}: {message}")]
    MigrationFailed { version: u32, message: String },

    #[error("corrupt record {name:?}: {message}")]
    CorruptRecord { name: String, message: String },

    #[error("record {name:?} has no id")]
    MissingId { name: String },
}

impl StorageError {
    /// Map a rusqlite error message into the matching variant.
    pub fn sqlite(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains("database is locked") || message.contains("database is busy") {
            Self::Busy { message }
        } else {
            Self::SqliteError { message }
        }
    }
}

impl ScmdbErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Busy { .. } => error_code::DB_BUSY,
            Self::MigrationFailed { .. } => error_code::MIGRATION_FAILED,
            _ => error_code::STORAGE_ERROR,
        }
    }
}
