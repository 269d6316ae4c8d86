//! Script directory scanning errors.

use std::path::PathBuf;

use super::error_code::{self, ScmdbErrorCode};

/// Errors that can occur while loading scripts from disk.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("cannot list script directory {path}: {source}")]
    ListDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read script {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid script name {name:?}: {reason}")]
    InvalidScriptName { name: String, reason: String },
}

impl ScmdbErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidScriptName { .. } => error_code::INVALID_SCRIPT_NAME,
            _ => error_code::SCAN_ERROR,
        }
    }
}
