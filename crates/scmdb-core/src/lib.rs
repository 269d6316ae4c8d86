//! scmdb-core: shared foundation for the scmdb workspace.
//!
//! Errors, configuration, events, tracing setup, script types, and the
//! collaborator traits implemented by storage and DDL backends.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod traits;
pub mod types;

pub use errors::{CheckoutError, ScmdbErrorCode};
pub use types::script::{NamingConvention, ScriptDescriptor, ScriptStatus, ScriptType};
