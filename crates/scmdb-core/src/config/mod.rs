//! Configuration system for scmdb.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod ddl_config;
pub mod scmdb_config;
pub mod scripts_config;
pub mod storage_config;

pub use ddl_config::DdlConfig;
pub use scmdb_config::{CliOverrides, ScmdbConfig};
pub use scripts_config::ScriptsConfig;
pub use storage_config::StorageConfig;
