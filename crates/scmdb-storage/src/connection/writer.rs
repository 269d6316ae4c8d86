//! Write helpers: BEGIN IMMEDIATE transactions.

use rusqlite::{Connection, Transaction, TransactionBehavior};
use scmdb_core::errors::StorageError;

/// Execute a write operation inside a BEGIN IMMEDIATE transaction.
///
/// The write lock is taken at transaction start. If `f` fails the
/// transaction is rolled back when it is dropped, so nothing from `f`
/// reaches the database.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> Result<T, StorageError>
where
    F: FnOnce(&Transaction<'_>) -> Result<T, StorageError>,
{
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| StorageError::sqlite(format!("failed to begin immediate transaction: {e}")))?;

    let result = f(&tx)?;

    tx.commit()
        .map_err(|e| StorageError::sqlite(format!("failed to commit: {e}")))?;

    Ok(result)
}
