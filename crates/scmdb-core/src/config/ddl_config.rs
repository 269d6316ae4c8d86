//! DDL output configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_DDL_OUTPUT_DIR;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DdlConfig {
    /// Generate DDL artifacts for new COMMIT scripts. Default: true.
    pub enabled: Option<bool>,
    /// Output directory, relative to the script directory. Default: "ddl".
    pub output_dir: Option<PathBuf>,
}

impl DdlConfig {
    pub fn effective_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }

    pub fn effective_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DDL_OUTPUT_DIR))
    }
}
