//! DDL manifest: records new COMMIT scripts for the DDL tooling.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use scmdb_core::errors::DdlError;
use scmdb_core::traits::DdlGenerator;
use scmdb_core::types::script::ScriptDescriptor;

pub const MANIFEST_FILE: &str = "pending.ddl.txt";

/// Writes `<name> <hash>` lines to `<script_dir>/<output_dir>/pending.ddl.txt`.
///
/// Each run replaces the manifest with the scripts it was given.
///
/// No schema introspection happens here; the manifest tells downstream DDL
/// tooling which COMMIT scripts changed the schema since it last ran.
#[derive(Debug, Clone)]
pub struct ManifestDdlGenerator {
    output_dir: PathBuf,
}

impl ManifestDdlGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn manifest_path(&self, script_dir: &Path) -> PathBuf {
        script_dir.join(&self.output_dir).join(MANIFEST_FILE)
    }
}

impl DdlGenerator for ManifestDdlGenerator {
    fn generate_ddl(
        &self,
        new_commit_scripts: &[ScriptDescriptor],
        script_dir: &Path,
    ) -> Result<(), DdlError> {
        let path = self.manifest_path(script_dir);
        let write_err = |source| DdlError::Write {
            path: path.clone(),
            source,
        };

        if new_commit_scripts.is_empty() {
            return match fs::remove_file(&path) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(write_err(e)),
                _ => Ok(()),
            };
        }

        let mut scripts: Vec<&ScriptDescriptor> = new_commit_scripts.iter().collect();
        scripts.sort_by(|a, b| a.name.cmp(&b.name));
        let manifest: String = scripts
            .iter()
            .map(|s| format!("{} {}\n", s.name, s.file_hash))
            .collect();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&path, manifest).map_err(write_err)?;
        tracing::info!(
            path = %path.display(),
            scripts = new_commit_scripts.len(),
            "recorded new commit scripts for DDL generation"
        );
        Ok(())
    }
}
