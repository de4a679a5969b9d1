// src/config/validate.rs

use crate::config::RunSpec;
use crate::errors::{DumprunError, Result};
use crate::exec::BackendKind;

/// Run semantic validation against a fully resolved run spec.
///
/// This checks:
/// - there is at least one dump file
/// - the chunk size, if set, is positive
/// - `slurm_job_id` is only combined with the slurm backend
///
/// It does **not** check that the executable or the dump files exist; a
/// missing executable surfaces as a launch fault, and missing dumps are
/// filtered out at dispatch time like any other non-regular file.
pub fn validate_spec(spec: &RunSpec) -> Result<()> {
    if spec.dumps.is_empty() {
        return Err(DumprunError::Config(
            "no dump files given (pass them as arguments or set `runner.dumps`)".into(),
        ));
    }

    if spec.chunk_size == Some(0) {
        return Err(DumprunError::Config(
            "chunk size must be positive (omit it to test each dump as one chunk)".into(),
        ));
    }

    if spec.slurm_job_id.is_some() && spec.backend != BackendKind::Slurm {
        return Err(DumprunError::Config(
            "--slurm-job-id is only meaningful with --backend slurm".into(),
        ));
    }

    Ok(())
}
