//! V002: index backing the newest-script lookup.

pub const MIGRATION_SQL: &str = r#"
CREATE INDEX IF NOT EXISTS idx_db_script_name_ts
    ON db_script(name DESC, ts DESC);
"#;
