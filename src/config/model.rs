// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// This maps `Dumprun.toml`:
///
/// ```toml
/// [runner]
/// executable = "./obj_dir/deflate_test"
/// report_dir = "reports"
/// chunk_size = 1048576
/// backend = "local"
/// trace = false
/// fail_fast = false
/// dumps = ["captures/a.bin", "captures/b.bin"]
/// ```
///
/// Every key is optional; CLI flags take precedence over the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Run settings from `[runner]`.
    #[serde(default)]
    pub runner: RunnerSection,
}

/// `[runner]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunnerSection {
    /// Path to the test executable.
    #[serde(default)]
    pub executable: Option<PathBuf>,

    /// Dump files to validate.
    #[serde(default)]
    pub dumps: Vec<PathBuf>,

    /// Root directory for per-dump report subdirectories.
    #[serde(default)]
    pub report_dir: Option<PathBuf>,

    /// Chunk size in bytes; omitted means "whole file, one chunk".
    #[serde(default)]
    pub chunk_size: Option<u64>,

    /// `"local"` or `"slurm"`; validated when the config is resolved.
    #[serde(default)]
    pub backend: Option<String>,

    /// Ask the executable to write VCD traces.
    #[serde(default)]
    pub trace: Option<bool>,

    /// Abort the whole run on the first failing chunk.
    #[serde(default)]
    pub fail_fast: Option<bool>,

    /// Existing SLURM allocation to attach to.
    #[serde(default)]
    pub slurm_job_id: Option<u64>,
}
