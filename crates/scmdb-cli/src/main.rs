//! scmdb: keep applied-script history in step with the working copy.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Serialize;

use scmdb_checkout::{
    CheckoutFacade, CheckoutReport, CheckoutSettings, ManifestDdlGenerator, StatusReport,
};
use scmdb_core::config::{CliOverrides, ScmdbConfig};
use scmdb_core::errors::CheckoutError;
use scmdb_core::events::{EventDispatcher, TracingEventHandler};
use scmdb_core::traits::{DdlGenerator, NoopDdlGenerator};
use scmdb_core::ScmdbErrorCode;
use scmdb_storage::{DatabaseManager, SqliteScriptRepository};

#[derive(Parser)]
#[command(name = "scmdb")]
#[command(about = "Reconcile SQL change scripts with the database's applied history")]
struct Cli {
    /// Project root holding scmdb.toml
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Script directory (overrides config)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// History database path (overrides config)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile history with the script directory and stage what must run
    Checkout {
        /// Skip the DDL manifest for new commit scripts
        #[arg(long)]
        no_ddl: bool,
    },

    /// Show recorded history and unseen scripts without changing anything
    Status,

    /// Record every numbered script as applied; only valid on an empty history
    Seed,
}

fn main() -> ExitCode {
    scmdb_core::tracing::init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e.coded_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CheckoutError> {
    let overrides = CliOverrides {
        script_dir: cli.dir.clone(),
        db_path: cli.db.clone(),
        no_ddl: matches!(cli.command, Commands::Checkout { no_ddl: true }),
    };
    let config = ScmdbConfig::load(&cli.root, Some(&overrides))?;
    let script_dir = config.script_dir(&cli.root);
    let db_path = config.db_path(&cli.root);
    tracing::debug!(
        script_dir = %script_dir.display(),
        db = %db_path.display(),
        "resolved paths"
    );

    let repo = SqliteScriptRepository::new(DatabaseManager::open(&db_path)?);
    let mut events = EventDispatcher::new();
    events.register(Arc::new(TracingEventHandler));

    let manifest;
    let ddl: &dyn DdlGenerator = if config.ddl.effective_enabled() {
        manifest = ManifestDdlGenerator::new(config.ddl.effective_output_dir());
        &manifest
    } else {
        &NoopDdlGenerator
    };

    let facade = CheckoutFacade::new(&repo, ddl, &events, CheckoutSettings::from_config(&config));
    match cli.command {
        Commands::Checkout { .. } => {
            let report = facade.checkout(&script_dir)?;
            emit(cli.json, &report, || print_checkout(&report));
        }
        Commands::Status => {
            let report = facade.status(&script_dir)?;
            emit(cli.json, &report, || print_status(&report, &script_dir));
        }
        Commands::Seed => {
            let seeded = facade.seed(&script_dir)?;
            emit(cli.json, &SeedReport { seeded }, || {
                println!("recorded {seeded} scripts as applied")
            });
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct SeedReport {
    seeded: usize,
}

fn emit<T: Serialize>(json: bool, report: &T, human: impl FnOnce()) {
    if !json {
        human();
        return;
    }
    match serde_json::to_string_pretty(report) {
        Ok(text) => println!("{text}"),
        Err(e) => tracing::error!(error = %e, "failed to serialize report"),
    }
}

fn print_checkout(report: &CheckoutReport) {
    if report.first_run {
        println!("first run: recorded {} scripts as applied", report.seeded);
        return;
    }
    for name in &report.new_scripts {
        println!("new       {name}");
    }
    for name in &report.updated_hashes {
        println!("changed   {name}");
    }
    if report.deleted > 0 {
        println!("removed {} records for scripts no longer on disk", report.deleted);
    }
    if let Some(staging) = &report.staging {
        for path in &staging.manual_rollbacks {
            println!("ROLLBACK  {} (run manually)", path.display());
        }
        for path in &staging.copied {
            println!("staged    {}", path.display());
        }
        println!("staging directory: {}", staging.dir.display());
    }
}

fn print_status(report: &StatusReport, script_dir: &Path) {
    println!("script directory: {}", script_dir.display());
    println!("recorded scripts: {}", report.recorded);
    if let Some(newest) = &report.newest {
        println!("newest recorded:  {newest}");
    }
    if report.recorded == 0 {
        println!("history is empty; the next checkout records every script as applied");
        return;
    }
    if report.new_scripts.is_empty() {
        println!("no new scripts");
    }
    for name in &report.new_scripts {
        println!("new       {name}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::parse_from(["scmdb", "checkout", "--no-ddl", "--dir", "sql", "--json"]);
        assert!(matches!(cli.command, Commands::Checkout { no_ddl: true }));
        assert_eq!(cli.dir, Some(PathBuf::from("sql")));
        assert!(cli.json);
        assert_eq!(cli.root, PathBuf::from("."));
    }
}
