//! Checkout run errors.

use super::error_code::{self, ScmdbErrorCode};
use super::{ConfigError, DdlError, ScanError, StageError, StorageError};

/// Errors that abort a checkout run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Stage error: {0}")]
    Stage(#[from] StageError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("DDL error: {0}")]
    Ddl(#[from] DdlError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("history store already holds {count} scripts")]
    NotFirstRun { count: i64 },
}

impl ScmdbErrorCode for CheckoutError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Stage(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Ddl(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::NotFirstRun { .. } => error_code::NOT_FIRST_RUN,
        }
    }
}
