//! DDL generation errors.

use std::path::PathBuf;

use super::error_code::{self, ScmdbErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum DdlError {
    #[error("cannot write DDL artifact {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("DDL generation failed: {0}")]
    Generation(String),
}

impl ScmdbErrorCode for DdlError {
    fn error_code(&self) -> &'static str {
        error_code::DDL_ERROR
    }
}
