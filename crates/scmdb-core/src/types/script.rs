//! Script descriptors and the file naming convention.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ROLLBACK_SUFFIX, DEFAULT_SCRIPT_EXTENSION};

/// Whether a script applies a change or reverses one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    Commit,
    Rollback,
}

impl ScriptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Commit => "commit",
            Self::Rollback => "rollback",
        }
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScriptType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "commit" => Ok(Self::Commit),
            "rollback" => Ok(Self::Rollback),
            other => Err(format!("unknown script type {other:?}")),
        }
    }
}

/// Outcome recorded for an applied script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStatus {
    #[default]
    Executed,
    ExecutedWithErrors,
}

impl ScriptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Executed => "executed",
            Self::ExecutedWithErrors => "executed_with_errors",
        }
    }
}

impl FromStr for ScriptStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "executed" => Ok(Self::Executed),
            "executed_with_errors" => Ok(Self::ExecutedWithErrors),
            other => Err(format!("unknown script status {other:?}")),
        }
    }
}

/// One change script, loaded from disk or read from the history store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptDescriptor {
    /// Store identity. `None` until the record has been persisted.
    pub id: Option<i64>,
    /// File name, including the extension. Unique in both sets.
    pub name: String,
    pub script_type: ScriptType,
    /// xxh3-64 of the file content as 16 hex digits.
    pub file_hash: String,
    pub text: String,
    /// Unix seconds when the script was recorded as applied.
    pub applied_at: Option<i64>,
    pub output: Option<String>,
    pub status: ScriptStatus,
    /// Current on-disk location of the body, if any.
    #[serde(skip)]
    pub file: Option<PathBuf>,
}

impl ScriptDescriptor {
    pub fn is_commit(&self) -> bool {
        self.script_type == ScriptType::Commit
    }

    pub fn is_rollback(&self) -> bool {
        self.script_type == ScriptType::Rollback
    }
}

/// The `<digits>_<description>[<rollback suffix>].<ext>` naming rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConvention {
    extension: String,
    rollback_suffix: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self::new(DEFAULT_SCRIPT_EXTENSION, DEFAULT_ROLLBACK_SUFFIX)
    }
}

impl NamingConvention {
    pub fn new(extension: impl Into<String>, rollback_suffix: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            rollback_suffix: rollback_suffix.into(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn rollback_suffix(&self) -> &str {
        &self.rollback_suffix
    }

    /// A dev script is anything not starting with `<digits>_`.
    /// Pure function of the name; file content is never consulted.
    pub fn is_dev_script(name: &str) -> bool {
        let mut parts = name.split('_');
        let first = parts.next().unwrap_or_default();
        if parts.next().is_none() {
            return true;
        }
        first.is_empty() || !first.bytes().all(|b| b.is_ascii_digit())
    }

    /// Strip `.<ext>` if present.
    pub fn stem<'a>(&self, name: &'a str) -> &'a str {
        name.strip_suffix(&self.extension)
            .and_then(|s| s.strip_suffix('.'))
            .unwrap_or(name)
    }

    /// Classify a script by its name.
    pub fn script_type(&self, name: &str) -> ScriptType {
        if self.stem(name).ends_with(&self.rollback_suffix) {
            ScriptType::Rollback
        } else {
            ScriptType::Commit
        }
    }

    /// Name of the ROLLBACK paired with a COMMIT script.
    pub fn rollback_name(&self, commit_name: &str) -> String {
        format!(
            "{}{}.{}",
            self.stem(commit_name),
            self.rollback_suffix,
            self.extension
        )
    }

    /// Name of the COMMIT paired with a ROLLBACK script, `None` if `name`
    /// carries no rollback suffix.
    pub fn commit_name(&self, rollback_name: &str) -> Option<String> {
        self.stem(rollback_name)
            .strip_suffix(&self.rollback_suffix)
            .map(|stem| format!("{stem}.{}", self.extension))
    }

    /// The rollback name for `script` when it is a COMMIT.
    pub fn rollback_name_of(&self, script: &ScriptDescriptor) -> Option<String> {
        script.is_commit().then(|| self.rollback_name(&script.name))
    }

    /// Check that a numbered script name can be paired under this convention.
    /// Dev scripts are always accepted; they take no part in pairing.
    pub fn validate(&self, name: &str) -> Result<(), String> {
        if Self::is_dev_script(name) {
            return Ok(());
        }
        let stem = self.stem(name);
        let description = stem.split_once('_').map(|(_, d)| d).unwrap_or_default();
        if description.is_empty() {
            return Err("missing description after the sequence number".to_string());
        }
        if let Some(commit_stem) = stem.strip_suffix(&self.rollback_suffix) {
            let commit_desc = commit_stem.split_once('_').map(|(_, d)| d);
            if commit_desc.map_or(true, str::is_empty) {
                return Err(format!(
                    "rollback marker {:?} leaves no description to pair with",
                    self.rollback_suffix
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_scripts() {
        assert!(NamingConvention::is_dev_script("scratch.sql"));
        assert!(NamingConvention::is_dev_script("my_test.sql"));
        assert!(NamingConvention::is_dev_script("_0001_a.sql"));
        assert!(NamingConvention::is_dev_script("0001.sql"));
        assert!(NamingConvention::is_dev_script("12a_fix.sql"));
        assert!(!NamingConvention::is_dev_script("0001_a.sql"));
        assert!(!NamingConvention::is_dev_script("42_add_column_rollback.sql"));
    }

    #[test]
    fn classify_and_pair() {
        let naming = NamingConvention::default();
        assert_eq!(naming.script_type("0001_a.sql"), ScriptType::Commit);
        assert_eq!(naming.script_type("0001_a_rollback.sql"), ScriptType::Rollback);
        assert_eq!(naming.rollback_name("0001_a.sql"), "0001_a_rollback.sql");
        assert_eq!(
            naming.commit_name("0001_a_rollback.sql").as_deref(),
            Some("0001_a.sql")
        );
        assert_eq!(naming.commit_name("0001_a.sql"), None);
    }

    #[test]
    fn custom_suffix() {
        let naming = NamingConvention::new("sql", "_rlbk");
        assert_eq!(naming.script_type("0001_a_rlbk.sql"), ScriptType::Rollback);
        assert_eq!(naming.rollback_name("0001_a.sql"), "0001_a_rlbk.sql");
    }

    #[test]
    fn validate_rejects_unpairable_names() {
        let naming = NamingConvention::default();
        assert!(naming.validate("0001_.sql").is_err());
        assert!(naming.validate("0001_rollback.sql").is_err());
        assert!(naming.validate("0001_a.sql").is_ok());
        assert!(naming.validate("0001_a_rollback.sql").is_ok());
        assert!(naming.validate("notes.sql").is_ok());
    }

    #[test]
    fn type_round_trips_through_str() {
        for t in [ScriptType::Commit, ScriptType::Rollback] {
            assert_eq!(t.as_str().parse::<ScriptType>().unwrap(), t);
        }
        assert!("other".parse::<ScriptType>().is_err());
    }
}
