//! Tests for the event system.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use scmdb_core::events::handler::ScmdbEventHandler;
use scmdb_core::events::types::*;
use scmdb_core::events::{EventDispatcher, TracingEventHandler};

#[derive(Default)]
struct CountingHandler {
    drift: AtomicUsize,
    staged: AtomicUsize,
}

impl ScmdbEventHandler for CountingHandler {
    fn on_hash_drift(&self, _event: &HashDriftEvent) {
        self.drift.fetch_add(1, Ordering::Relaxed);
    }

    fn on_rollback_staged(&self, _event: &RollbackStagedEvent) {
        self.staged.fetch_add(1, Ordering::Relaxed);
    }
}

struct PanickingHandler;

impl ScmdbEventHandler for PanickingHandler {
    fn on_hash_drift(&self, _event: &HashDriftEvent) {
        panic!("handler bug");
    }
}

fn drift_event() -> HashDriftEvent {
    HashDriftEvent {
        name: "0001_a.sql".to_string(),
        recorded_hash: "00".to_string(),
        observed_hash: "11".to_string(),
    }
}

#[test]
fn empty_dispatcher_is_a_no_op() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.on_hash_drift(&drift_event());
}

#[test]
fn dispatches_to_every_handler() {
    let a = Arc::new(CountingHandler::default());
    let b = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(a.clone());
    dispatcher.register(b.clone());

    dispatcher.on_hash_drift(&drift_event());
    dispatcher.on_rollback_staged(&RollbackStagedEvent {
        name: "0001_a_rollback.sql".to_string(),
        path: PathBuf::from("EXECUTE_ME/0001_a_rollback.sql"),
    });

    for h in [&a, &b] {
        assert_eq!(h.drift.load(Ordering::Relaxed), 1);
        assert_eq!(h.staged.load(Ordering::Relaxed), 1);
    }
}

#[test]
fn panicking_handler_does_not_block_others() {
    let counter = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counter.clone());

    dispatcher.on_hash_drift(&drift_event());
    assert_eq!(counter.drift.load(Ordering::Relaxed), 1);
}

#[test]
fn tracing_handler_accepts_every_event() {
    let handler = TracingEventHandler;
    handler.on_hash_drift(&drift_event());
    handler.on_dev_script_ignored(&DevScriptIgnoredEvent {
        name: "scratch.sql".to_string(),
    });
    handler.on_error(&ErrorEvent {
        message: "boom".to_string(),
        error_code: "STAGE_ERROR".to_string(),
    });
}
