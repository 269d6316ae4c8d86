//! Staging directory errors.

use std::path::PathBuf;

use super::error_code::{self, ScmdbErrorCode};

/// Errors raised while materializing the staging directory.
///
/// All of them abort the run. Nothing already written is cleaned up.
#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error("cannot delete staging directory {path}: {source}")]
    RemoveDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot create staging directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write rollback script {path}: {source}")]
    WriteRollback {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot copy {from} to {to}: {source}")]
    CopyScript {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

impl ScmdbErrorCode for StageError {
    fn error_code(&self) -> &'static str {
        error_code::STAGE_ERROR
    }
}
