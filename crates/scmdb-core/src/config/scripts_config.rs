//! Script directory configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_EXEC_DIR_NAME, DEFAULT_ROLLBACK_SUFFIX, DEFAULT_SCRIPT_EXTENSION};
use crate::types::script::NamingConvention;

/// Where change scripts live and how they are named.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScriptsConfig {
    /// Script directory. Default: the project root.
    pub dir: Option<PathBuf>,
    /// Script file extension without the dot. Default: "sql".
    pub extension: Option<String>,
    /// Stem suffix marking a ROLLBACK script. Default: "_rollback".
    pub rollback_suffix: Option<String>,
    /// Staging directory name under `dir`. Default: "EXECUTE_ME".
    pub exec_dir_name: Option<String>,
}

impl ScriptsConfig {
    pub fn effective_extension(&self) -> &str {
        self.extension.as_deref().unwrap_or(DEFAULT_SCRIPT_EXTENSION)
    }

    pub fn effective_rollback_suffix(&self) -> &str {
        self.rollback_suffix.as_deref().unwrap_or(DEFAULT_ROLLBACK_SUFFIX)
    }

    pub fn effective_exec_dir_name(&self) -> &str {
        self.exec_dir_name.as_deref().unwrap_or(DEFAULT_EXEC_DIR_NAME)
    }

    pub fn naming(&self) -> NamingConvention {
        NamingConvention::new(self.effective_extension(), self.effective_rollback_suffix())
    }
}
