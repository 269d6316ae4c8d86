//! Collaborator traits implemented outside the planning core.

pub mod ddl;
pub mod repository;

pub use ddl::{DdlGenerator, NoopDdlGenerator};
pub use repository::ScriptRepository;
