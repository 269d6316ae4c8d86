//! SQLite implementation of `ScriptRepository`.

use scmdb_core::errors::StorageError;
use scmdb_core::traits::ScriptRepository;
use scmdb_core::types::collections::ScriptMap;
use scmdb_core::types::script::ScriptDescriptor;

use crate::connection::writer::with_immediate_transaction;
use crate::connection::DatabaseManager;
use crate::queries::scripts;

pub struct SqliteScriptRepository {
    db: DatabaseManager,
}

impl SqliteScriptRepository {
    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &DatabaseManager {
        &self.db
    }
}

impl ScriptRepository for SqliteScriptRepository {
    fn read_map(&self) -> Result<ScriptMap, StorageError> {
        self.db.with_conn(scripts::read_all)
    }

    fn read_newest(&self) -> Result<Option<ScriptDescriptor>, StorageError> {
        self.db.with_conn(scripts::read_newest)
    }

    fn read_count(&self) -> Result<i64, StorageError> {
        self.db.with_conn(scripts::count_scripts)
    }

    fn batch_create(&self, batch: &[ScriptDescriptor]) -> Result<(), StorageError> {
        self.db.with_conn(|conn| {
            with_immediate_transaction(conn, |tx| scripts::insert_scripts(tx, batch))
        })
    }

    fn delete_by_ids(&self, ids: &[i64]) -> Result<(), StorageError> {
        if ids.is_empty() {
            return Ok(());
        }
        self.db.with_conn(|conn| {
            with_immediate_transaction(conn, |tx| scripts::delete_by_ids(tx, ids).map(|_| ()))
        })
    }

    fn update(&self, script: &ScriptDescriptor) -> Result<(), StorageError> {
        self.db.with_conn(|conn| scripts::update_script(conn, script))
    }

    fn apply_reconciliation(
        &self,
        updates: &[ScriptDescriptor],
        delete_ids: &[i64],
    ) -> Result<(), StorageError> {
        if updates.is_empty() && delete_ids.is_empty() {
            return Ok(());
        }
        self.db.with_conn(|conn| {
            with_immediate_transaction(conn, |tx| {
                for script in updates {
                    scripts::update_script(tx, script)?;
                }
                let deleted = scripts::delete_by_ids(tx, delete_ids)?;
                tracing::debug!(
                    updated = updates.len(),
                    deleted,
                    "committed reconciliation"
                );
                Ok(())
            })
        })
    }
}
