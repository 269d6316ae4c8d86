//! Event payload types.

use std::path::PathBuf;

/// Payload for `on_scan_complete`.
#[derive(Debug, Clone)]
pub struct ScanCompleteEvent {
    pub dir: PathBuf,
    pub script_count: usize,
    pub duration_ms: u64,
}

/// Payload for `on_dev_script_ignored`.
#[derive(Debug, Clone)]
pub struct DevScriptIgnoredEvent {
    pub name: String,
}

/// Payload for `on_hash_drift`.
#[derive(Debug, Clone)]
pub struct HashDriftEvent {
    pub name: String,
    pub recorded_hash: String,
    pub observed_hash: String,
}

/// Payload for `on_scripts_deleted`.
#[derive(Debug, Clone)]
pub struct ScriptsDeletedEvent {
    pub names: Vec<String>,
}

/// Payload for `on_rollback_staged`.
#[derive(Debug, Clone)]
pub struct RollbackStagedEvent {
    pub name: String,
    pub path: PathBuf,
}

/// Payload for `on_script_copied`.
#[derive(Debug, Clone)]
pub struct ScriptCopiedEvent {
    pub name: String,
    pub path: PathBuf,
}

/// Payload for `on_history_seeded`.
#[derive(Debug, Clone)]
pub struct HistorySeededEvent {
    pub dir: PathBuf,
    pub script_count: usize,
}

/// Payload for `on_error`.
#[derive(Debug, Clone)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
