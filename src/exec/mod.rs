// src/exec/mod.rs

//! Execution backend layer.
//!
//! This module turns one chunk descriptor plus the run's `ExecutionConfig`
//! into a concrete subprocess invocation and its captured exit status.
//!
//! - [`backend`] owns the backend choice (local vs. SLURM) and the pure
//!   command-line construction for both.
//! - [`command`] spawns the process with `tokio::process::Command`, drains
//!   its output, and produces a [`ChunkOutcome`].

pub mod backend;
pub mod command;

pub use backend::{command_line, BackendKind};
pub use command::{run_chunk, ChunkOutcome};

use std::path::PathBuf;

/// Immutable per-run settings shared read-only with every execution unit.
///
/// Captured once at dispatch time; units never consult ambient state.
#[derive(Debug, Clone)]
pub struct ExecutionConfig {
    /// Path to the test executable.
    pub executable: PathBuf,
    /// How execution units are launched.
    pub backend: BackendKind,
    /// Ask the executable to write VCD traces next to each report file.
    pub trace: bool,
    /// Abort the whole dispatch on the first failing chunk.
    pub fail_fast: bool,
    /// Existing SLURM allocation to attach to instead of requesting one.
    pub slurm_job_id: Option<u64>,
}
