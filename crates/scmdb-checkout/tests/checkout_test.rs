//! End-to-end checkout runs against an in-memory history store.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use scmdb_checkout::loader::hasher::hash_content;
use scmdb_checkout::{CheckoutFacade, CheckoutSettings, ManifestDdlGenerator};
use scmdb_core::errors::{CheckoutError, ScanError, ScmdbErrorCode};
use scmdb_core::events::types::{ErrorEvent, HistorySeededEvent};
use scmdb_core::events::ScmdbEventHandler;
use scmdb_core::traits::{NoopDdlGenerator, ScriptRepository};
use scmdb_core::types::script::{NamingConvention, ScriptType};
use scmdb_storage::{DatabaseManager, SqliteScriptRepository};
use tempfile::TempDir;

#[derive(Default)]
struct Recorder {
    seeded: Mutex<Vec<usize>>,
    errors: Mutex<Vec<String>>,
}

impl ScmdbEventHandler for Recorder {
    fn on_history_seeded(&self, event: &HistorySeededEvent) {
        self.seeded.lock().unwrap().push(event.script_count);
    }

    fn on_error(&self, event: &ErrorEvent) {
        self.errors.lock().unwrap().push(event.error_code.clone());
    }
}

fn repo() -> SqliteScriptRepository {
    SqliteScriptRepository::new(DatabaseManager::open_in_memory().unwrap())
}

fn settings(rollback_suffix: &str) -> CheckoutSettings {
    CheckoutSettings {
        naming: NamingConvention::new("sql", rollback_suffix),
        exec_dir_name: "EXECUTE_ME".to_string(),
        generate_ddl: true,
    }
}

fn write(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

#[test]
fn first_run_bootstraps_every_numbered_script() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "0001_a.sql", "CREATE TABLE a (id INT);");
    write(dir.path(), "0002_b.sql", "CREATE TABLE b (id INT);");
    write(dir.path(), "0002_b_rollback.sql", "DROP TABLE b;");
    write(dir.path(), "scratch.sql", "SELECT 1;");

    let repo = repo();
    let events = Recorder::default();
    let facade = CheckoutFacade::new(&repo, &NoopDdlGenerator, &events, settings("_rollback"));
    assert!(facade.is_first_run().unwrap());

    let report = facade.checkout(dir.path()).unwrap();

    assert!(report.first_run);
    assert_eq!(report.seeded, 3);
    assert!(report.new_scripts.is_empty());
    assert!(report.staging.is_none());
    assert!(!dir.path().join("EXECUTE_ME").exists());
    assert_eq!(*events.seeded.lock().unwrap(), vec![3]);

    let history = repo.read_map().unwrap();
    assert_eq!(history.len(), 3);
    assert!(!history.contains_key("scratch.sql"));
    assert!(history.values().all(|s| s.applied_at.is_some() && s.id.is_some()));
    assert_eq!(history["0002_b_rollback.sql"].script_type, ScriptType::Rollback);
    assert!(!facade.is_first_run().unwrap());
}

#[test]
fn vanished_commit_stages_its_recorded_rollback() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "0001_a.sql", "CREATE TABLE a (id INT);");
    write(dir.path(), "0001_a_rlbk.sql", "DROP TABLE a;");

    let repo = repo();
    let events = Recorder::default();
    let facade = CheckoutFacade::new(&repo, &NoopDdlGenerator, &events, settings("_rlbk"));
    facade.checkout(dir.path()).unwrap();

    fs::remove_file(dir.path().join("0001_a.sql")).unwrap();
    let report = facade.checkout(dir.path()).unwrap();

    assert_eq!(report.deleted, 1);
    let staging = report.staging.unwrap();
    let staged = dir.path().join("EXECUTE_ME/0001_a_rlbk.sql");
    assert_eq!(staging.manual_rollbacks, vec![staged.clone()]);
    assert_eq!(fs::read_to_string(staged).unwrap(), "DROP TABLE a;");

    let history = repo.read_map().unwrap();
    assert!(!history.contains_key("0001_a.sql"));
    assert!(history.contains_key("0001_a_rlbk.sql"));

    // Nothing left to reconcile on a rerun.
    let again = facade.checkout(dir.path()).unwrap();
    assert_eq!(again.deleted, 0);
    assert!(again.updated_hashes.is_empty());
    assert!(again.staging.unwrap().manual_rollbacks.is_empty());
}

#[test]
fn edited_script_only_updates_its_hash() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "0001_a.sql", "CREATE TABLE a (id INT);");

    let repo = repo();
    let events = Recorder::default();
    let facade = CheckoutFacade::new(&repo, &NoopDdlGenerator, &events, settings("_rollback"));
    facade.checkout(dir.path()).unwrap();

    let edited = "CREATE TABLE a (id INT, name TEXT);";
    write(dir.path(), "0001_a.sql", edited);
    let report = facade.checkout(dir.path()).unwrap();

    assert_eq!(report.updated_hashes, vec!["0001_a.sql"]);
    assert_eq!(report.deleted, 0);
    assert!(report.new_scripts.is_empty());
    let staging = report.staging.unwrap();
    assert!(staging.manual_rollbacks.is_empty());
    assert!(staging.copied.is_empty());

    let history = repo.read_map().unwrap();
    assert_eq!(history["0001_a.sql"].file_hash, hash_content(edited.as_bytes()));
}

#[test]
fn new_commit_scripts_reach_the_ddl_manifest() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "0001_a.sql", "CREATE TABLE a (id INT);");

    let repo = repo();
    let ddl = ManifestDdlGenerator::new("ddl");
    let events = Recorder::default();
    let facade = CheckoutFacade::new(&repo, &ddl, &events, settings("_rollback"));
    facade.checkout(dir.path()).unwrap();

    write(dir.path(), "0002_b.sql", "CREATE TABLE b (id INT);");
    write(dir.path(), "0002_b_rollback.sql", "DROP TABLE b;");
    write(dir.path(), "wip.sql", "SELECT 2;");
    let report = facade.checkout(dir.path()).unwrap();

    assert_eq!(report.new_scripts, vec!["0002_b.sql", "0002_b_rollback.sql"]);
    let manifest = fs::read_to_string(ddl.manifest_path(dir.path())).unwrap();
    let expected = format!("0002_b.sql {}\n", hash_content(b"CREATE TABLE b (id INT);"));
    assert_eq!(manifest, expected);
}

#[test]
fn status_reports_without_writing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "0001_a.sql", "CREATE TABLE a (id INT);");

    let repo = repo();
    let events = Recorder::default();
    let facade = CheckoutFacade::new(&repo, &NoopDdlGenerator, &events, settings("_rollback"));
    let empty = facade.status(dir.path()).unwrap();
    assert_eq!(empty.recorded, 0);
    assert!(empty.newest.is_none());

    facade.checkout(dir.path()).unwrap();
    write(dir.path(), "0002_b.sql", "CREATE TABLE b (id INT);");

    let status = facade.status(dir.path()).unwrap();
    assert_eq!(status.recorded, 1);
    assert_eq!(status.newest.as_deref(), Some("0001_a.sql"));
    assert_eq!(status.new_scripts, vec!["0002_b.sql"]);
    assert_eq!(repo.read_count().unwrap(), 1);
    assert!(!dir.path().join("EXECUTE_ME").exists());
}

#[test]
fn seed_refuses_a_populated_store() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "0001_a.sql", "CREATE TABLE a (id INT);");

    let repo = repo();
    let events = Recorder::default();
    let facade = CheckoutFacade::new(&repo, &NoopDdlGenerator, &events, settings("_rollback"));
    assert_eq!(facade.seed(dir.path()).unwrap(), 1);

    let err = facade.seed(dir.path()).unwrap_err();
    assert!(matches!(err, CheckoutError::NotFirstRun { count: 1 }));
    assert_eq!(*events.errors.lock().unwrap(), vec!["NOT_FIRST_RUN"]);
}

#[test]
fn unpairable_name_aborts_the_run() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "0001_a.sql", "CREATE TABLE a (id INT);");

    let repo = repo();
    let events = Recorder::default();
    let facade = CheckoutFacade::new(&repo, &NoopDdlGenerator, &events, settings("_rollback"));
    facade.checkout(dir.path()).unwrap();

    write(dir.path(), "0002_rollback.sql", "DROP TABLE nothing;");
    fs::remove_file(dir.path().join("0001_a.sql")).unwrap();
    let err = facade.checkout(dir.path()).unwrap_err();

    match &err {
        CheckoutError::Scan(ScanError::InvalidScriptName { name, .. }) => {
            assert_eq!(name, "0002_rollback.sql")
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.error_code(), "INVALID_SCRIPT_NAME");
    assert_eq!(*events.errors.lock().unwrap(), vec!["INVALID_SCRIPT_NAME"]);
    assert_eq!(repo.read_count().unwrap(), 1);
}

#[test]
fn missing_script_dir_is_a_scan_error() {
    let dir = TempDir::new().unwrap();
    let repo = repo();
    let events = Recorder::default();
    let facade = CheckoutFacade::new(&repo, &NoopDdlGenerator, &events, settings("_rollback"));

    let err = facade.checkout(&dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, CheckoutError::Scan(ScanError::ListDir { .. })));
}

#[test]
fn scripts_to_exec_recreates_the_staging_dir() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "0001_a.sql", "CREATE TABLE a (id INT);");

    let repo = repo();
    let events = Recorder::default();
    let facade = CheckoutFacade::new(&repo, &NoopDdlGenerator, &events, settings("_rollback"));
    facade.checkout(dir.path()).unwrap();

    let exec = dir.path().join("EXECUTE_ME");
    fs::create_dir_all(&exec).unwrap();
    fs::write(exec.join("leftover.sql"), "SELECT 1;").unwrap();

    let staging = facade.get_scripts_to_exec(dir.path()).unwrap();
    assert_eq!(staging.dir, exec);
    assert_eq!(fs::read_dir(&exec).unwrap().count(), 0);
}

#[test]
fn repeated_checkouts_list_each_new_script_once() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "0001_a.sql", "CREATE TABLE a (id INT);");

    let repo = repo();
    let ddl = ManifestDdlGenerator::new("ddl");
    let events = Recorder::default();
    let facade = CheckoutFacade::new(&repo, &ddl, &events, settings("_rollback"));
    facade.checkout(dir.path()).unwrap();

    write(dir.path(), "0002_b.sql", "CREATE TABLE b (id INT);");
    for _ in 0..3 {
        facade.checkout(dir.path()).unwrap();
    }

    let manifest = fs::read_to_string(ddl.manifest_path(dir.path())).unwrap();
    assert_eq!(manifest.lines().count(), 1);
    assert!(manifest.starts_with("0002_b.sql "));
    assert_eq!(repo.read_count().unwrap(), 1);

    fs::remove_file(dir.path().join("0002_b.sql")).unwrap();
    facade.checkout(dir.path()).unwrap();
    assert!(!ddl.manifest_path(dir.path()).exists());
}

#[test]
fn switching_away_from_a_branch_stages_the_vanished_rollback() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "0001_base.sql", "CREATE TABLE base (id INT);");
    write(dir.path(), "0002_a.sql", "CREATE TABLE a (id INT);");
    write(dir.path(), "0002_a_rollback.sql", "DROP TABLE a;");

    let repo = repo();
    let events = Recorder::default();
    let facade = CheckoutFacade::new(&repo, &NoopDdlGenerator, &events, settings("_rollback"));
    facade.checkout(dir.path()).unwrap();

    fs::remove_file(dir.path().join("0002_a.sql")).unwrap();
    fs::remove_file(dir.path().join("0002_a_rollback.sql")).unwrap();
    let report = facade.checkout(dir.path()).unwrap();

    assert_eq!(report.deleted, 2);
    let staged = dir.path().join("EXECUTE_ME/0002_a_rollback.sql");
    assert_eq!(report.staging.unwrap().manual_rollbacks, vec![staged.clone()]);
    assert_eq!(fs::read_to_string(staged).unwrap(), "DROP TABLE a;");

    let history = repo.read_map().unwrap();
    assert_eq!(history.len(), 1);
    assert!(history.contains_key("0001_base.sql"));
}
