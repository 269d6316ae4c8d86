//! V001: db_script, one row per applied change script.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS db_script (
    db_script_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    file_hash TEXT NOT NULL,
    text TEXT NOT NULL,
    ts INTEGER,
    output TEXT,
    type TEXT NOT NULL CHECK (type IN ('commit', 'rollback')),
    status TEXT NOT NULL DEFAULT 'executed'
) STRICT;
"#;
