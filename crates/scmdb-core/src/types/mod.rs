//! Shared types.

pub mod collections;
pub mod script;
