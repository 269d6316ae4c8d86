//! db_script CRUD queries.

use rusqlite::{params, Connection, Row};
use scmdb_core::errors::StorageError;
use scmdb_core::types::collections::ScriptMap;
use scmdb_core::types::script::{ScriptDescriptor, ScriptStatus, ScriptType};

const SELECT_COLUMNS: &str =
    "SELECT db_script_id, name, file_hash, text, ts, output, type, status FROM db_script";

/// Raw row, before enum columns are validated.
struct ScriptRow {
    id: i64,
    name: String,
    file_hash: String,
    text: String,
    ts: Option<i64>,
    output: Option<String>,
    script_type: String,
    status: String,
}

impl ScriptRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            file_hash: row.get(2)?,
            text: row.get(3)?,
            ts: row.get(4)?,
            output: row.get(5)?,
            script_type: row.get(6)?,
            status: row.get(7)?,
        })
    }

    fn into_descriptor(self) -> Result<ScriptDescriptor, StorageError> {
        let script_type: ScriptType =
            self.script_type
                .parse()
                .map_err(|message| StorageError::CorruptRecord {
                    name: self.name.clone(),
                    message,
                })?;
        let status: ScriptStatus =
            self.status
                .parse()
                .map_err(|message| StorageError::CorruptRecord {
                    name: self.name.clone(),
                    message,
                })?;
        Ok(ScriptDescriptor {
            id: Some(self.id),
            name: self.name,
            script_type,
            file_hash: self.file_hash,
            text: self.text,
            applied_at: self.ts,
            output: self.output,
            status,
            file: None,
        })
    }
}

fn sqlite_err(e: rusqlite::Error) -> StorageError {
    StorageError::sqlite(e.to_string())
}

/// Load every record keyed by name.
pub fn read_all(conn: &Connection) -> Result<ScriptMap, StorageError> {
    let mut stmt = conn.prepare_cached(SELECT_COLUMNS).map_err(sqlite_err)?;
    let rows = stmt.query_map([], ScriptRow::from_row).map_err(sqlite_err)?;

    let mut result = ScriptMap::default();
    for row in rows {
        let script = row.map_err(sqlite_err)?.into_descriptor()?;
        result.insert(script.name.clone(), script);
    }
    Ok(result)
}

/// The record with the greatest name, latest `ts` first among equals.
pub fn read_newest(conn: &Connection) -> Result<Option<ScriptDescriptor>, StorageError> {
    let sql = format!("{SELECT_COLUMNS} ORDER BY name DESC, ts DESC LIMIT 1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    let mut rows = stmt.query_map([], ScriptRow::from_row).map_err(sqlite_err)?;

    match rows.next() {
        Some(row) => Ok(Some(row.map_err(sqlite_err)?.into_descriptor()?)),
        None => Ok(None),
    }
}

/// Look up one record by name.
pub fn read_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<ScriptDescriptor>, StorageError> {
    let sql = format!("{SELECT_COLUMNS} WHERE name = ?1");
    let mut stmt = conn.prepare_cached(&sql).map_err(sqlite_err)?;
    let mut rows = stmt
        .query_map(params![name], ScriptRow::from_row)
        .map_err(sqlite_err)?;

    match rows.next() {
        Some(row) => Ok(Some(row.map_err(sqlite_err)?.into_descriptor()?)),
        None => Ok(None),
    }
}

/// Count stored records.
pub fn count_scripts(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM db_script", [], |row| row.get(0))
        .map_err(sqlite_err)
}

/// Insert records. Callers wrap this in a transaction for atomicity.
pub fn insert_scripts(conn: &Connection, scripts: &[ScriptDescriptor]) -> Result<(), StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "INSERT INTO db_script (name, file_hash, text, ts, output, type, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )
        .map_err(sqlite_err)?;

    for script in scripts {
        stmt.execute(params![
            script.name,
            script.file_hash,
            script.text,
            script.applied_at,
            script.output,
            script.script_type.as_str(),
            script.status.as_str(),
        ])
        .map_err(sqlite_err)?;
    }
    Ok(())
}

/// Overwrite every column of the record with `script.id`.
pub fn update_script(conn: &Connection, script: &ScriptDescriptor) -> Result<(), StorageError> {
    let id = script.id.ok_or_else(|| StorageError::MissingId {
        name: script.name.clone(),
    })?;
    conn.prepare_cached(
        "UPDATE db_script SET name = ?1, file_hash = ?2, text = ?3, ts = ?4,
                output = ?5, type = ?6, status = ?7
         WHERE db_script_id = ?8",
    )
    .and_then(|mut stmt| {
        stmt.execute(params![
            script.name,
            script.file_hash,
            script.text,
            script.applied_at,
            script.output,
            script.script_type.as_str(),
            script.status.as_str(),
            id,
        ])
    })
    .map_err(sqlite_err)?;
    Ok(())
}

/// Delete records by id. Unknown ids are ignored.
pub fn delete_by_ids(conn: &Connection, ids: &[i64]) -> Result<usize, StorageError> {
    let mut stmt = conn
        .prepare_cached("DELETE FROM db_script WHERE db_script_id = ?1")
        .map_err(sqlite_err)?;
    let mut deleted = 0;
    for id in ids {
        deleted += stmt.execute(params![id]).map_err(sqlite_err)?;
    }
    Ok(deleted)
}
