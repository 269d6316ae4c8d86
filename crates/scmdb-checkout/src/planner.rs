//! Reconciliation of on-disk scripts against recorded history.

use rayon::prelude::*;
use scmdb_core::errors::StorageError;
use scmdb_core::events::types::{DevScriptIgnoredEvent, HashDriftEvent, ScriptsDeletedEvent};
use scmdb_core::events::ScmdbEventHandler;
use scmdb_core::types::collections::{FxHashSet, ScriptMap};
use scmdb_core::types::script::{NamingConvention, ScriptDescriptor, ScriptType};

use crate::types::ExecutionPlan;

/// Diffs a loaded script directory against persisted history.
pub struct ReconciliationPlanner<'a> {
    naming: &'a NamingConvention,
    events: &'a dyn ScmdbEventHandler,
}

impl<'a> ReconciliationPlanner<'a> {
    pub fn new(naming: &'a NamingConvention, events: &'a dyn ScmdbEventHandler) -> Self {
        Self { naming, events }
    }

    /// Decide updates, deletions, rollbacks to run, and scripts to stage.
    ///
    /// Drifted hashes are corrected in `persisted` in place. Nothing is
    /// written to the store here; the caller commits `to_update` and
    /// `to_delete` together. A deleted record without an id fails the plan.
    pub fn plan_execution(
        &self,
        persisted: &mut ScriptMap,
        on_disk: &[ScriptDescriptor],
    ) -> Result<ExecutionPlan, StorageError> {
        let mut plan = ExecutionPlan::default();
        let on_disk: Vec<&ScriptDescriptor> = on_disk
            .iter()
            .filter(|s| !NamingConvention::is_dev_script(&s.name))
            .collect();

        for script in &on_disk {
            let Some(saved) = persisted.get_mut(&script.name) else {
                continue;
            };
            if saved.file_hash != script.file_hash {
                self.events.on_hash_drift(&HashDriftEvent {
                    name: script.name.clone(),
                    recorded_hash: saved.file_hash.clone(),
                    observed_hash: script.file_hash.clone(),
                });
                saved.file_hash = script.file_hash.clone();
                plan.to_update.push(saved.clone());
            }
        }

        let disk_names: FxHashSet<&str> = on_disk.iter().map(|s| s.name.as_str()).collect();
        let mut deleted: Vec<&ScriptDescriptor> = persisted
            .values()
            .filter(|s| !NamingConvention::is_dev_script(&s.name))
            .filter(|s| !disk_names.contains(s.name.as_str()))
            .collect();
        deleted.sort_by(|a, b| a.name.cmp(&b.name));

        let mut deleted_names = Vec::new();
        let mut queued: FxHashSet<&str> = FxHashSet::default();
        for script in &deleted {
            let remove = match script.script_type {
                ScriptType::Rollback => true,
                ScriptType::Commit => {
                    let rollback = self
                        .naming
                        .rollback_name_of(script)
                        .and_then(|name| persisted.get(&name));
                    match rollback {
                        Some(rollback) => {
                            if queued.insert(rollback.name.as_str()) {
                                plan.rollbacks_to_run.push(rollback.clone());
                            }
                            true
                        }
                        None => false,
                    }
                }
            };
            if remove {
                let id = script.id.ok_or_else(|| StorageError::MissingId {
                    name: script.name.clone(),
                })?;
                plan.to_delete.push(id);
                deleted_names.push(script.name.clone());
            }
        }
        if !deleted_names.is_empty() {
            self.events.on_scripts_deleted(&ScriptsDeletedEvent {
                names: deleted_names,
            });
        }

        // ROLLBACK scripts on disk that history already knows about.
        plan.scripts_to_stage = on_disk
            .iter()
            .filter(|s| s.script_type == ScriptType::Rollback)
            .filter(|s| persisted.contains_key(&s.name))
            .map(|s| (*s).clone())
            .collect();

        Ok(plan)
    }

    /// On-disk scripts not yet recorded, dev scripts excluded.
    pub fn find_new_scripts(
        &self,
        persisted: &ScriptMap,
        on_disk: &[ScriptDescriptor],
    ) -> Vec<ScriptDescriptor> {
        on_disk
            .par_iter()
            .filter(|s| NamingConvention::is_dev_script(&s.name))
            .for_each(|s| {
                self.events.on_dev_script_ignored(&DevScriptIgnoredEvent {
                    name: s.name.clone(),
                })
            });

        let mut new_scripts: Vec<ScriptDescriptor> = on_disk
            .par_iter()
            .filter(|s| !persisted.contains_key(&s.name))
            .filter(|s| !NamingConvention::is_dev_script(&s.name))
            .cloned()
            .collect();
        new_scripts.sort_by(|a, b| a.name.cmp(&b.name));
        new_scripts
    }
}
