//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};

use super::script::ScriptDescriptor;

/// Persisted scripts keyed by name.
pub type ScriptMap = FxHashMap<String, ScriptDescriptor>;
