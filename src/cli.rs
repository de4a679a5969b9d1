// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::exec::BackendKind;

/// Command-line arguments for `dumprun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dumprun",
    version,
    about = "Run a test executable over fixed-size chunks of dump files, in parallel.",
    long_about = None
)]
pub struct CliArgs {
    /// Dump files to validate (non-regular files are skipped).
    #[arg(value_name = "DUMPS")]
    pub dumps: Vec<PathBuf>,

    /// Path to the test executable.
    #[arg(long, value_name = "PATH")]
    pub executable: Option<PathBuf>,

    /// Root directory for per-dump report subdirectories.
    ///
    /// Default: `reports` in the current working directory.
    #[arg(long, value_name = "PATH")]
    pub report_dir: Option<PathBuf>,

    /// Chunk size in bytes. Omit to test each dump as a single chunk.
    #[arg(long, value_name = "BYTES")]
    pub chunk_size: Option<u64>,

    /// Execution backend.
    #[arg(long, value_enum, value_name = "BACKEND")]
    pub backend: Option<BackendArg>,

    /// Ask the executable to write VCD traces (kept only for failing chunks).
    #[arg(long)]
    pub trace: bool,

    /// Abort the whole run on the first failing chunk.
    #[arg(long)]
    pub fail_fast: bool,

    /// Attach scheduled chunks to an existing SLURM job allocation.
    #[arg(long, value_name = "ID")]
    pub slurm_job_id: Option<u64>,

    /// Path to the config file (TOML).
    ///
    /// Default: `Dumprun.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DUMPRUN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Plan chunks and print the invocations, but don't execute anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Execution backend as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Local,
    Slurm,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Local => BackendKind::Local,
            BackendArg::Slurm => BackendKind::Slurm,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
