//! CheckoutFacade: the end-to-end run after a working-copy switch.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use scmdb_core::config::ScmdbConfig;
use scmdb_core::errors::{CheckoutError, DdlError, ScmdbErrorCode, StorageError};
use scmdb_core::events::types::{ErrorEvent, HistorySeededEvent};
use scmdb_core::events::ScmdbEventHandler;
use scmdb_core::traits::{DdlGenerator, ScriptRepository};
use scmdb_core::types::script::{NamingConvention, ScriptDescriptor, ScriptStatus};

use crate::loader::load_scripts;
use crate::planner::ReconciliationPlanner;
use crate::stager::ExecutionStager;
use crate::types::{CheckoutReport, StagingOutcome, StatusReport};

/// Naming and staging settings for a run.
#[derive(Debug, Clone)]
pub struct CheckoutSettings {
    pub naming: NamingConvention,
    pub exec_dir_name: String,
    pub generate_ddl: bool,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self::from_config(&ScmdbConfig::default())
    }
}

impl CheckoutSettings {
    pub fn from_config(config: &ScmdbConfig) -> Self {
        Self {
            naming: config.scripts.naming(),
            exec_dir_name: config.scripts.effective_exec_dir_name().to_string(),
            generate_ddl: config.ddl.effective_enabled(),
        }
    }
}

struct Reconciled {
    updated: Vec<String>,
    deleted: usize,
    staging: StagingOutcome,
}

/// Ties the loader, planner, and stager to a repository and a DDL generator.
pub struct CheckoutFacade<'a> {
    repo: &'a dyn ScriptRepository,
    ddl: &'a dyn DdlGenerator,
    events: &'a dyn ScmdbEventHandler,
    settings: CheckoutSettings,
}

impl<'a> CheckoutFacade<'a> {
    pub fn new(
        repo: &'a dyn ScriptRepository,
        ddl: &'a dyn DdlGenerator,
        events: &'a dyn ScmdbEventHandler,
        settings: CheckoutSettings,
    ) -> Self {
        Self {
            repo,
            ddl,
            events,
            settings,
        }
    }

    /// True iff no script has ever been recorded.
    pub fn is_first_run(&self) -> Result<bool, StorageError> {
        Ok(self.repo.read_count()? == 0)
    }

    /// Record every numbered script in `script_dir` as already applied.
    pub fn create_all_from_path(&self, script_dir: &Path) -> Result<usize, CheckoutError> {
        let now = unix_now();
        let scripts: Vec<ScriptDescriptor> = self
            .load(script_dir)?
            .into_iter()
            .filter(|s| !NamingConvention::is_dev_script(&s.name))
            .map(|mut s| {
                s.applied_at = Some(now);
                s.status = ScriptStatus::Executed;
                s
            })
            .collect();

        self.repo.batch_create(&scripts)?;
        self.events.on_history_seeded(&HistorySeededEvent {
            dir: script_dir.to_path_buf(),
            script_count: scripts.len(),
        });
        Ok(scripts.len())
    }

    /// Bootstrap an empty store; refuses when history already exists.
    pub fn seed(&self, script_dir: &Path) -> Result<usize, CheckoutError> {
        self.report_errors(|| {
            let count = self.repo.read_count()?;
            if count > 0 {
                return Err(CheckoutError::NotFirstRun { count });
            }
            self.create_all_from_path(script_dir)
        })
    }

    /// Scripts on disk that history has never seen.
    pub fn get_new_scripts(
        &self,
        script_dir: &Path,
    ) -> Result<Vec<ScriptDescriptor>, CheckoutError> {
        tracing::debug!(dir = %script_dir.display(), "searching new scripts");
        let persisted = self.repo.read_map()?;
        let on_disk = self.load(script_dir)?;
        Ok(self.planner().find_new_scripts(&persisted, &on_disk))
    }

    /// Reconcile history with disk, commit the changes, and stage what must run.
    pub fn get_scripts_to_exec(&self, script_dir: &Path) -> Result<StagingOutcome, CheckoutError> {
        let on_disk = self.load(script_dir)?;
        Ok(self.reconcile(script_dir, &on_disk)?.staging)
    }

    /// Hand the COMMIT scripts among `new_scripts` to the DDL generator.
    pub fn gen_ddl(
        &self,
        script_dir: &Path,
        new_scripts: &[ScriptDescriptor],
    ) -> Result<(), DdlError> {
        let commits: Vec<ScriptDescriptor> = new_scripts
            .iter()
            .filter(|s| s.is_commit())
            .cloned()
            .collect();
        self.ddl.generate_ddl(&commits, script_dir)
    }

    /// Full run: bootstrap on first use, otherwise reconcile, stage, and
    /// generate DDL for new COMMIT scripts.
    pub fn checkout(&self, script_dir: &Path) -> Result<CheckoutReport, CheckoutError> {
        self.report_errors(|| {
            if self.is_first_run()? {
                let seeded = self.create_all_from_path(script_dir)?;
                return Ok(CheckoutReport {
                    first_run: true,
                    seeded,
                    ..Default::default()
                });
            }

            let on_disk = self.load(script_dir)?;
            let new_scripts = {
                let persisted = self.repo.read_map()?;
                self.planner().find_new_scripts(&persisted, &on_disk)
            };
            let applied = self.reconcile(script_dir, &on_disk)?;

            if self.settings.generate_ddl {
                self.gen_ddl(script_dir, &new_scripts)?;
            }

            Ok(CheckoutReport {
                first_run: false,
                seeded: 0,
                new_scripts: new_scripts.into_iter().map(|s| s.name).collect(),
                updated_hashes: applied.updated,
                deleted: applied.deleted,
                staging: Some(applied.staging),
            })
        })
    }

    /// History count, newest record, and unseen scripts. Writes nothing.
    pub fn status(&self, script_dir: &Path) -> Result<StatusReport, CheckoutError> {
        let recorded = self.repo.read_count()?;
        let newest = self.repo.read_newest()?.map(|s| s.name);
        let new_scripts = if recorded == 0 {
            Vec::new()
        } else {
            self.get_new_scripts(script_dir)?
                .into_iter()
                .map(|s| s.name)
                .collect()
        };
        Ok(StatusReport {
            recorded,
            newest,
            new_scripts,
        })
    }

    /// Plan, commit updates and deletions atomically, then stage.
    fn reconcile(
        &self,
        script_dir: &Path,
        on_disk: &[ScriptDescriptor],
    ) -> Result<Reconciled, CheckoutError> {
        let mut persisted = self.repo.read_map()?;
        let mut plan = self.planner().plan_execution(&mut persisted, on_disk)?;

        if !plan.to_update.is_empty() || !plan.to_delete.is_empty() {
            tracing::debug!(
                updates = plan.to_update.len(),
                deletes = plan.to_delete.len(),
                "committing history changes"
            );
            self.repo
                .apply_reconciliation(&plan.to_update, &plan.to_delete)?;
        }

        let staging = self.stager().stage(
            script_dir,
            &mut plan.scripts_to_stage,
            &plan.rollbacks_to_run,
        )?;

        Ok(Reconciled {
            updated: plan.to_update.into_iter().map(|s| s.name).collect(),
            deleted: plan.to_delete.len(),
            staging,
        })
    }

    fn load(&self, script_dir: &Path) -> Result<Vec<ScriptDescriptor>, CheckoutError> {
        Ok(load_scripts(script_dir, &self.settings.naming, self.events)?)
    }

    fn planner(&self) -> ReconciliationPlanner<'_> {
        ReconciliationPlanner::new(&self.settings.naming, self.events)
    }

    fn stager(&self) -> ExecutionStager<'_> {
        ExecutionStager::new(&self.settings.exec_dir_name, self.events)
    }

    fn report_errors<T>(
        &self,
        run: impl FnOnce() -> Result<T, CheckoutError>,
    ) -> Result<T, CheckoutError> {
        run().inspect_err(|e| {
            self.events.on_error(&ErrorEvent {
                message: e.to_string(),
                error_code: e.error_code().to_string(),
            })
        })
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
