//! DdlGenerator: consumer of newly applied COMMIT scripts.

use std::path::Path;

use crate::errors::DdlError;
use crate::types::script::ScriptDescriptor;

/// Produces or refreshes DDL artifacts for a set of new COMMIT scripts.
pub trait DdlGenerator {
    fn generate_ddl(
        &self,
        new_commit_scripts: &[ScriptDescriptor],
        script_dir: &Path,
    ) -> Result<(), DdlError>;
}

/// Generator used when DDL output is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDdlGenerator;

impl DdlGenerator for NoopDdlGenerator {
    fn generate_ddl(&self, _: &[ScriptDescriptor], _: &Path) -> Result<(), DdlError> {
        Ok(())
    }
}
