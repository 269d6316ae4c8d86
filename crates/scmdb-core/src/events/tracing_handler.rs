//! Handler that forwards events to `tracing` at their signal level.

use super::handler::ScmdbEventHandler;
use super::types::*;

/// Warn on hash drift, info on staged rollbacks and ignored dev scripts.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEventHandler;

impl ScmdbEventHandler for TracingEventHandler {
    fn on_scan_complete(&self, event: &ScanCompleteEvent) {
        tracing::debug!(
            dir = %event.dir.display(),
            scripts = event.script_count,
            duration_ms = event.duration_ms,
            "scanned script directory"
        );
    }

    fn on_dev_script_ignored(&self, event: &DevScriptIgnoredEvent) {
        tracing::info!(name = %event.name, "dev script was ignored");
    }

    fn on_hash_drift(&self, event: &HashDriftEvent) {
        tracing::warn!(
            name = %event.name,
            recorded = %event.recorded_hash,
            observed = %event.observed_hash,
            "script file was changed"
        );
    }

    fn on_scripts_deleted(&self, event: &ScriptsDeletedEvent) {
        tracing::debug!(count = event.names.len(), "deleting missing scripts from history");
    }

    fn on_history_seeded(&self, event: &HistorySeededEvent) {
        tracing::info!(
            dir = %event.dir.display(),
            scripts = event.script_count,
            "first run, recorded existing scripts as applied"
        );
    }

    fn on_rollback_staged(&self, event: &RollbackStagedEvent) {
        tracing::info!(path = %event.path.display(), "execute rollback script manually");
    }

    fn on_script_copied(&self, event: &ScriptCopiedEvent) {
        tracing::debug!(path = %event.path.display(), "copied new script");
    }

    fn on_error(&self, event: &ErrorEvent) {
        tracing::error!(code = %event.error_code, "{}", event.message);
    }
}
