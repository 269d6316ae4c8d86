//! ScriptRepository: persisted history of applied scripts.

use crate::errors::StorageError;
use crate::types::collections::ScriptMap;
use crate::types::script::ScriptDescriptor;

/// Persisted key-value store of script descriptors keyed by name.
///
/// Batch operations are atomic: either every row is written or none is.
pub trait ScriptRepository {
    /// All records, keyed by name.
    fn read_map(&self) -> Result<ScriptMap, StorageError>;

    /// The record with the greatest name, latest timestamp breaking ties.
    fn read_newest(&self) -> Result<Option<ScriptDescriptor>, StorageError>;

    /// Number of stored records.
    fn read_count(&self) -> Result<i64, StorageError>;

    /// Insert all records in one transaction.
    fn batch_create(&self, scripts: &[ScriptDescriptor]) -> Result<(), StorageError>;

    /// Delete the given ids in one transaction.
    fn delete_by_ids(&self, ids: &[i64]) -> Result<(), StorageError>;

    /// Overwrite a single record by id.
    fn update(&self, script: &ScriptDescriptor) -> Result<(), StorageError>;

    /// Apply hash updates and deletions of one reconciliation run together.
    fn apply_reconciliation(
        &self,
        updates: &[ScriptDescriptor],
        delete_ids: &[i64],
    ) -> Result<(), StorageError>;
}
