//! Checkout data types: ExecutionPlan, StagingOutcome, reports.

use std::path::PathBuf;

use scmdb_core::types::script::ScriptDescriptor;
use serde::Serialize;

/// What one reconciliation pass decided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Persisted records whose hash was replaced by the on-disk value.
    pub to_update: Vec<ScriptDescriptor>,
    /// Ids of persisted records to remove.
    pub to_delete: Vec<i64>,
    /// Stored ROLLBACK scripts whose COMMIT disappeared from disk.
    pub rollbacks_to_run: Vec<ScriptDescriptor>,
    /// On-disk scripts handed to the stager alongside the rollbacks.
    pub scripts_to_stage: Vec<ScriptDescriptor>,
}

impl ExecutionPlan {
    /// True when the run changes neither history nor staging.
    pub fn is_noop(&self) -> bool {
        self.to_update.is_empty()
            && self.to_delete.is_empty()
            && self.rollbacks_to_run.is_empty()
            && self.scripts_to_stage.is_empty()
    }
}

/// Files written into the staging directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StagingOutcome {
    pub dir: PathBuf,
    /// Rollback bodies written from history; run these by hand.
    pub manual_rollbacks: Vec<PathBuf>,
    /// COMMIT scripts copied from the script directory.
    pub copied: Vec<PathBuf>,
}

/// Summary of a `checkout` run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckoutReport {
    pub first_run: bool,
    /// Records inserted by the first-run bootstrap.
    pub seeded: usize,
    pub new_scripts: Vec<String>,
    pub updated_hashes: Vec<String>,
    pub deleted: usize,
    pub staging: Option<StagingOutcome>,
}

/// Read-only view of history versus disk.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusReport {
    pub recorded: i64,
    pub newest: Option<String>,
    pub new_scripts: Vec<String>,
}
