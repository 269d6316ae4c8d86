//! Script loader: non-recursive discovery, content hashing, classification.

pub mod hasher;
pub mod loader;

pub use loader::load_scripts;
