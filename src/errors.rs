// src/errors.rs

//! Crate-wide error taxonomy.
//!
//! Two classes of failure must never be conflated here:
//! - environment faults (`Launch`, `Io`, `Config`): the run cannot proceed,
//!   always fatal;
//! - chunk test failures (`ChunkFailed`): the executable ran and said "no",
//!   fatal only under `--fail-fast`. The result handler constructs this
//!   variant only when the policy escalates the failure.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumprunError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("chunk test failed: dump = {dump:?}, seek = {seek}, exit = {exit_code}")]
    ChunkFailed {
        dump: PathBuf,
        seek: u64,
        exit_code: i32,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DumprunError>;
