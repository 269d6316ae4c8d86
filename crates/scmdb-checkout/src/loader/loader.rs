//! Directory scan producing `ScriptDescriptor`s.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use scmdb_core::errors::ScanError;
use scmdb_core::events::types::ScanCompleteEvent;
use scmdb_core::events::ScmdbEventHandler;
use scmdb_core::types::script::{NamingConvention, ScriptDescriptor, ScriptStatus};

use super::hasher::hash_content;

/// Load every `*.<ext>` file directly inside `dir`.
///
/// Subdirectories are not entered. Numbered names that cannot be paired under
/// `naming` fail the whole scan. Output is sorted by name.
pub fn load_scripts(
    dir: &Path,
    naming: &NamingConvention,
    events: &dyn ScmdbEventHandler,
) -> Result<Vec<ScriptDescriptor>, ScanError> {
    let start = Instant::now();
    let files = list_script_files(dir, naming)?;

    let mut scripts = files
        .par_iter()
        .map(|(name, path)| load_script(name, path, naming))
        .collect::<Result<Vec<_>, _>>()?;
    scripts.sort_by(|a, b| a.name.cmp(&b.name));

    events.on_scan_complete(&ScanCompleteEvent {
        dir: dir.to_path_buf(),
        script_count: scripts.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    });
    Ok(scripts)
}

/// File name and path of every script file in `dir`, names validated.
fn list_script_files(
    dir: &Path,
    naming: &NamingConvention,
) -> Result<Vec<(String, PathBuf)>, ScanError> {
    let list_err = |source| ScanError::ListDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(naming.extension()) {
            continue;
        }

        let name = entry
            .file_name()
            .into_string()
            .map_err(|raw| ScanError::InvalidScriptName {
                name: raw.to_string_lossy().into_owned(),
                reason: "file name is not valid UTF-8".to_string(),
            })?;
        naming
            .validate(&name)
            .map_err(|reason| ScanError::InvalidScriptName {
                name: name.clone(),
                reason,
            })?;
        files.push((name, path));
    }
    Ok(files)
}

fn load_script(
    name: &str,
    path: &Path,
    naming: &NamingConvention,
) -> Result<ScriptDescriptor, ScanError> {
    let content = fs::read(path).map_err(|source| ScanError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(ScriptDescriptor {
        id: None,
        name: name.to_string(),
        script_type: naming.script_type(name),
        file_hash: hash_content(&content),
        text: String::from_utf8_lossy(&content).into_owned(),
        applied_at: None,
        output: None,
        status: ScriptStatus::Executed,
        file: Some(path.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scmdb_core::types::script::ScriptType;

    struct NoOp;
    impl ScmdbEventHandler for NoOp {}

    #[test]
    fn skips_other_extensions_and_subdirectories() {
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(dir.path().join("0001_a.sql"), "a").unwrap();
        fs::write(dir.path().join("0001_a_rollback.sql"), "undo a").unwrap();
        fs::write(dir.path().join("README.md"), "docs").unwrap();
        fs::create_dir(dir.path().join("EXECUTE_ME")).unwrap();
        fs::write(dir.path().join("EXECUTE_ME").join("0002_b.sql"), "b").unwrap();

        let scripts = load_scripts(dir.path(), &NamingConvention::default(), &NoOp).unwrap();
        let names: Vec<_> = scripts.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["0001_a.sql", "0001_a_rollback.sql"]);
        assert_eq!(scripts[0].script_type, ScriptType::Commit);
        assert_eq!(scripts[1].script_type, ScriptType::Rollback);
        assert_eq!(scripts[1].text, "undo a");
        assert_eq!(scripts[0].file_hash, hash_content(b"a"));
    }
}
