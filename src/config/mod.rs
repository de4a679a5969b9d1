// src/config/mod.rs

//! Configuration for dumprun.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Merge CLI flags over the file into a resolved [`RunSpec`].
//! - Validate the resolved spec (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, load_optional, DEFAULT_CONFIG_PATH};
pub use model::{ConfigFile, RunnerSection};
pub use validate::validate_spec;

use std::path::PathBuf;

use crate::cli::CliArgs;
use crate::errors::{DumprunError, Result};
use crate::exec::{BackendKind, ExecutionConfig};

/// Fully resolved run settings: CLI flags override `Dumprun.toml`, which
/// overrides built-in defaults.
#[derive(Debug, Clone)]
pub struct RunSpec {
    pub executable: PathBuf,
    pub dumps: Vec<PathBuf>,
    pub report_dir: PathBuf,
    pub chunk_size: Option<u64>,
    pub backend: BackendKind,
    pub trace: bool,
    pub fail_fast: bool,
    pub slurm_job_id: Option<u64>,
}

impl RunSpec {
    /// The immutable bundle handed to every execution unit.
    pub fn execution_config(&self) -> ExecutionConfig {
        ExecutionConfig {
            executable: self.executable.clone(),
            backend: self.backend,
            trace: self.trace,
            fail_fast: self.fail_fast,
            slurm_job_id: self.slurm_job_id,
        }
    }
}

/// Load the config file (if any), merge the CLI arguments over it, and
/// validate the result.
pub fn resolve(args: &CliArgs) -> Result<RunSpec> {
    let file = load_optional(args.config.as_deref())?;
    let spec = merge(args, file)?;
    validate_spec(&spec)?;
    Ok(spec)
}

/// Merge CLI flags over the config file, field by field; flags win.
fn merge(args: &CliArgs, file: ConfigFile) -> Result<RunSpec> {
    let runner = file.runner;

    let backend = match (args.backend, runner.backend.as_deref()) {
        (Some(arg), _) => arg.into(),
        (None, Some(s)) => s.parse::<BackendKind>().map_err(DumprunError::Config)?,
        (None, None) => BackendKind::default(),
    };

    let executable = args
        .executable
        .clone()
        .or(runner.executable)
        .ok_or_else(|| {
            DumprunError::Config(
                "no test executable given (use --executable or set `runner.executable`)".into(),
            )
        })?;

    let dumps = if args.dumps.is_empty() {
        runner.dumps
    } else {
        args.dumps.clone()
    };

    Ok(RunSpec {
        executable,
        dumps,
        report_dir: args
            .report_dir
            .clone()
            .or(runner.report_dir)
            .unwrap_or_else(|| PathBuf::from("reports")),
        chunk_size: args.chunk_size.or(runner.chunk_size),
        backend,
        trace: args.trace || runner.trace.unwrap_or(false),
        fail_fast: args.fail_fast || runner.fail_fast.unwrap_or(false),
        slurm_job_id: args.slurm_job_id.or(runner.slurm_job_id),
    })
}
