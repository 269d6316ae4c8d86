//! Materializes an execution plan into the staging directory.

use std::fs;
use std::path::{Path, PathBuf};

use scmdb_core::errors::StageError;
use scmdb_core::events::types::{RollbackStagedEvent, ScriptCopiedEvent};
use scmdb_core::events::ScmdbEventHandler;
use scmdb_core::types::script::{ScriptDescriptor, ScriptType};

use crate::types::StagingOutcome;

/// Writes rollbacks and copies commits into `<script_dir>/<exec_dir_name>`.
pub struct ExecutionStager<'a> {
    exec_dir_name: &'a str,
    events: &'a dyn ScmdbEventHandler,
}

impl<'a> ExecutionStager<'a> {
    pub fn new(exec_dir_name: &'a str, events: &'a dyn ScmdbEventHandler) -> Self {
        Self {
            exec_dir_name,
            events,
        }
    }

    pub fn exec_dir(&self, script_dir: &Path) -> PathBuf {
        script_dir.join(self.exec_dir_name)
    }

    /// Recreate the staging directory and fill it.
    ///
    /// Rollbacks are written from their stored text. COMMIT entries of
    /// `scripts_to_stage` are copied from `script_dir` and their `file` is
    /// pointed at the copy. Any I/O failure aborts; files already written
    /// stay where they are.
    pub fn stage(
        &self,
        script_dir: &Path,
        scripts_to_stage: &mut [ScriptDescriptor],
        rollbacks_to_run: &[ScriptDescriptor],
    ) -> Result<StagingOutcome, StageError> {
        let exec_dir = self.recreate_exec_dir(script_dir)?;
        let mut outcome = StagingOutcome {
            dir: exec_dir.clone(),
            ..Default::default()
        };

        for rollback in rollbacks_to_run {
            let path = exec_dir.join(&rollback.name);
            tracing::debug!(path = %path.display(), "creating rollback script");
            fs::write(&path, &rollback.text).map_err(|source| StageError::WriteRollback {
                path: path.clone(),
                source,
            })?;
            self.events.on_rollback_staged(&RollbackStagedEvent {
                name: rollback.name.clone(),
                path: path.clone(),
            });
            outcome.manual_rollbacks.push(path);
        }

        for script in scripts_to_stage
            .iter_mut()
            .filter(|s| s.script_type == ScriptType::Commit)
        {
            let from = script_dir.join(&script.name);
            let to = exec_dir.join(&script.name);
            fs::copy(&from, &to).map_err(|source| StageError::CopyScript {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;
            self.events.on_script_copied(&ScriptCopiedEvent {
                name: script.name.clone(),
                path: to.clone(),
            });
            script.file = Some(to.clone());
            outcome.copied.push(to);
        }

        Ok(outcome)
    }

    fn recreate_exec_dir(&self, script_dir: &Path) -> Result<PathBuf, StageError> {
        let exec_dir = self.exec_dir(script_dir);
        if exec_dir.exists() {
            fs::remove_dir_all(&exec_dir).map_err(|source| StageError::RemoveDir {
                path: exec_dir.clone(),
                source,
            })?;
        }
        fs::create_dir_all(&exec_dir).map_err(|source| StageError::CreateDir {
            path: exec_dir.clone(),
            source,
        })?;
        Ok(exec_dir)
    }
}
