//! scmdb-storage: SQLite-backed history of applied change scripts.

pub mod connection;
pub mod migrations;
pub mod queries;
pub mod repository;

pub use connection::DatabaseManager;
pub use repository::SqliteScriptRepository;
