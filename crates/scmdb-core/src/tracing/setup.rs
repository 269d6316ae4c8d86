//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::LOG_ENV_VAR;

static INIT: Once = Once::new();

/// Initialize the scmdb tracing/logging system.
///
/// Reads `SCMDB_LOG` for per-target levels, e.g.
/// `SCMDB_LOG=scmdb_checkout=debug,scmdb_storage=warn`.
/// Falls back to `info` for the scmdb crates when unset or invalid.
///
/// Idempotent.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| {
            EnvFilter::new("scmdb=info,scmdb_core=info,scmdb_storage=info,scmdb_checkout=info")
        });

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).without_time())
            .with(filter)
            .init();
    });
}
