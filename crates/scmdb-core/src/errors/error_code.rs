//! ScmdbErrorCode trait: stable codes for surfacing errors to callers.

/// Every error enum implements this to provide a structured code string.
pub trait ScmdbErrorCode {
    /// Returns the code string (e.g., "SCAN_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const INVALID_SCRIPT_NAME: &str = "INVALID_SCRIPT_NAME";
pub const STAGE_ERROR: &str = "STAGE_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const DB_BUSY: &str = "DB_BUSY";
pub const MIGRATION_FAILED: &str = "MIGRATION_FAILED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const DDL_ERROR: &str = "DDL_ERROR";
pub const NOT_FIRST_RUN: &str = "NOT_FIRST_RUN";
