//! Event system: handler trait, payloads, and synchronous dispatcher.

pub mod dispatcher;
pub mod handler;
pub mod tracing_handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::ScmdbEventHandler;
pub use tracing_handler::TracingEventHandler;
