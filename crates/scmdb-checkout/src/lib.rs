//! scmdb-checkout: reconcile a script directory with applied-script history.
//!
//! The loader scans the directory, the planner diffs it against the stored
//! history, and the stager writes whatever still has to run into a clean
//! `EXECUTE_ME` directory. `CheckoutFacade` drives the three in order.

pub mod ddl;
pub mod facade;
pub mod loader;
pub mod planner;
pub mod stager;
pub mod types;

pub use ddl::ManifestDdlGenerator;
pub use facade::{CheckoutFacade, CheckoutSettings};
pub use loader::load_scripts;
pub use planner::ReconciliationPlanner;
pub use stager::ExecutionStager;
pub use types::{CheckoutReport, ExecutionPlan, StagingOutcome, StatusReport};
