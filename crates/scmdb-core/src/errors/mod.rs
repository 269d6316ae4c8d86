//! Error handling for scmdb.
//! One error enum per subsystem, `thiserror` only.

pub mod checkout_error;
pub mod config_error;
pub mod ddl_error;
pub mod error_code;
pub mod scan_error;
pub mod stage_error;
pub mod storage_error;

pub use checkout_error::CheckoutError;
pub use config_error::ConfigError;
pub use ddl_error::DdlError;
pub use error_code::ScmdbErrorCode;
pub use scan_error::ScanError;
pub use stage_error::StageError;
pub use storage_error::StorageError;
