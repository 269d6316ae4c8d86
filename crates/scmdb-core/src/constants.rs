//! Shared constants for scmdb.

/// scmdb version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extension of change-script files, without the dot.
pub const DEFAULT_SCRIPT_EXTENSION: &str = "sql";

/// Suffix on the file stem that marks a ROLLBACK script.
pub const DEFAULT_ROLLBACK_SUFFIX: &str = "_rollback";

/// Staging directory created under the script directory.
pub const DEFAULT_EXEC_DIR_NAME: &str = "EXECUTE_ME";

/// Default history database, relative to the project root.
pub const DEFAULT_DB_PATH: &str = ".scmdb/history.db";

/// Default DDL output directory, relative to the script directory.
pub const DEFAULT_DDL_OUTPUT_DIR: &str = "ddl";

/// Project config file name.
pub const PROJECT_CONFIG_FILE: &str = "scmdb.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "SCMDB_LOG";
