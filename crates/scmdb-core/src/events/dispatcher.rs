//! EventDispatcher: synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::ScmdbEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn ScmdbEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn ScmdbEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Handlers that panic do not prevent later handlers from receiving the event.
    fn emit<F: Fn(&dyn ScmdbEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::error!("event handler panicked");
            }
        }
    }
}

impl ScmdbEventHandler for EventDispatcher {
    fn on_scan_complete(&self, event: &ScanCompleteEvent) {
        self.emit(|h| h.on_scan_complete(event));
    }

    fn on_dev_script_ignored(&self, event: &DevScriptIgnoredEvent) {
        self.emit(|h| h.on_dev_script_ignored(event));
    }

    fn on_hash_drift(&self, event: &HashDriftEvent) {
        self.emit(|h| h.on_hash_drift(event));
    }

    fn on_scripts_deleted(&self, event: &ScriptsDeletedEvent) {
        self.emit(|h| h.on_scripts_deleted(event));
    }

    fn on_history_seeded(&self, event: &HistorySeededEvent) {
        self.emit(|h| h.on_history_seeded(event));
    }

    fn on_rollback_staged(&self, event: &RollbackStagedEvent) {
        self.emit(|h| h.on_rollback_staged(event));
    }

    fn on_script_copied(&self, event: &ScriptCopiedEvent) {
        self.emit(|h| h.on_script_copied(event));
    }

    fn on_error(&self, event: &ErrorEvent) {
        self.emit(|h| h.on_error(event));
    }
}
