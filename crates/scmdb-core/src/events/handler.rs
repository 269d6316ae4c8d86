//! ScmdbEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing a checkout run.
///
/// All methods have no-op default implementations, so handlers only need
/// to override the events they care about.
pub trait ScmdbEventHandler: Send + Sync {
    // ---- Scan ----
    fn on_scan_complete(&self, _event: &ScanCompleteEvent) {}
    fn on_dev_script_ignored(&self, _event: &DevScriptIgnoredEvent) {}

    // ---- Reconciliation ----
    fn on_hash_drift(&self, _event: &HashDriftEvent) {}
    fn on_scripts_deleted(&self, _event: &ScriptsDeletedEvent) {}
    fn on_history_seeded(&self, _event: &HistorySeededEvent) {}

    // ---- Staging ----
    fn on_rollback_staged(&self, _event: &RollbackStagedEvent) {}
    fn on_script_copied(&self, _event: &ScriptCopiedEvent) {}

    // ---- Errors ----
    fn on_error(&self, _event: &ErrorEvent) {}
}
