//! Top-level scmdb configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{DdlConfig, ScriptsConfig, StorageConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`SCMDB_*`)
/// 3. Project config (`scmdb.toml` in project root)
/// 4. User config (`~/.scmdb/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScmdbConfig {
    pub scripts: ScriptsConfig,
    pub storage: StorageConfig,
    pub ddl: DdlConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub script_dir: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
    pub no_ddl: bool,
}

impl ScmdbConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &ScmdbConfig) -> Result<(), ConfigError> {
        if let Some(ext) = &config.scripts.extension {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::ValidationFailed {
                    field: "scripts.extension".to_string(),
                    message: "must be non-empty and given without the leading dot".to_string(),
                });
            }
        }
        if let Some(suffix) = &config.scripts.rollback_suffix {
            if suffix.len() < 2 || !suffix.starts_with('_') {
                return Err(ConfigError::ValidationFailed {
                    field: "scripts.rollback_suffix".to_string(),
                    message: "must start with '_' followed by a marker".to_string(),
                });
            }
        }
        if let Some(name) = &config.scripts.exec_dir_name {
            if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
                return Err(ConfigError::ValidationFailed {
                    field: "scripts.exec_dir_name".to_string(),
                    message: "must be a plain directory name".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Script directory, resolved against `root` when relative.
    pub fn script_dir(&self, root: &Path) -> PathBuf {
        match &self.scripts.dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => root.join(dir),
            None => root.to_path_buf(),
        }
    }

    /// History database path, resolved against `root` when relative.
    pub fn db_path(&self, root: &Path) -> PathBuf {
        let path = self.storage.effective_db_path();
        if path.is_absolute() {
            path
        } else {
            root.join(path)
        }
    }

    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".scmdb").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut ScmdbConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: ScmdbConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `Some` values in `other` win.
    fn merge(base: &mut ScmdbConfig, other: &ScmdbConfig) {
        if other.scripts.dir.is_some() {
            base.scripts.dir = other.scripts.dir.clone();
        }
        if other.scripts.extension.is_some() {
            base.scripts.extension = other.scripts.extension.clone();
        }
        if other.scripts.rollback_suffix.is_some() {
            base.scripts.rollback_suffix = other.scripts.rollback_suffix.clone();
        }
        if other.scripts.exec_dir_name.is_some() {
            base.scripts.exec_dir_name = other.scripts.exec_dir_name.clone();
        }

        if other.storage.db_path.is_some() {
            base.storage.db_path = other.storage.db_path.clone();
        }

        if other.ddl.enabled.is_some() {
            base.ddl.enabled = other.ddl.enabled;
        }
        if other.ddl.output_dir.is_some() {
            base.ddl.output_dir = other.ddl.output_dir.clone();
        }
    }

    /// Pattern: `SCMDB_SCRIPT_DIR`, `SCMDB_DB_PATH`, `SCMDB_DDL_ENABLED`.
    fn apply_env_overrides(config: &mut ScmdbConfig) {
        if let Some(val) = std::env::var_os("SCMDB_SCRIPT_DIR") {
            config.scripts.dir = Some(PathBuf::from(val));
        }
        if let Some(val) = std::env::var_os("SCMDB_DB_PATH") {
            config.storage.db_path = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("SCMDB_ROLLBACK_SUFFIX") {
            config.scripts.rollback_suffix = Some(val);
        }
        if let Ok(val) = std::env::var("SCMDB_DDL_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.ddl.enabled = Some(v);
            }
        }
    }

    fn apply_cli_overrides(config: &mut ScmdbConfig, cli: &CliOverrides) {
        if let Some(dir) = &cli.script_dir {
            config.scripts.dir = Some(dir.clone());
        }
        if let Some(db) = &cli.db_path {
            config.storage.db_path = Some(db.clone());
        }
        if cli.no_ddl {
            config.ddl.enabled = Some(false);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
