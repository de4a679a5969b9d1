// src/dispatch/outcome.rs

//! Per-chunk outcome policy: failure logging, fail-fast, trace retention.

use std::io::ErrorKind;

use tracing::{debug, warn};

use crate::errors::{DumprunError, Result};
use crate::exec::{ChunkOutcome, ExecutionConfig};

/// Apply the result policy to one completed execution unit.
///
/// - Non-zero exit with fail-fast disabled: log a structured warning
///   carrying enough to reproduce the chunk in isolation, and continue.
/// - Non-zero exit with fail-fast enabled: escalate to a fault that aborts
///   the dispatch.
/// - Zero exit: drop the chunk's trace files; they are kept only so a
///   developer can inspect failures. The report file is left untouched.
pub fn handle_outcome(outcome: &ChunkOutcome, config: &ExecutionConfig) -> Result<()> {
    if !outcome.passed() {
        if config.fail_fast {
            return Err(DumprunError::ChunkFailed {
                dump: outcome.dump.clone(),
                seek: outcome.chunk.seek,
                exit_code: outcome.exit_code,
            });
        }
        warn!(
            dump = %outcome.dump.display(),
            seek = outcome.chunk.seek,
            exit_code = outcome.exit_code,
            "chunk test failed"
        );
        return Ok(());
    }

    for trace in &outcome.trace_files {
        match std::fs::remove_file(trace) {
            Ok(()) => debug!(trace = %trace.display(), "removed trace of passing chunk"),
            // The executable is free not to produce a trace at all.
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                warn!(trace = %trace.display(), error = %err, "failed to remove trace file");
            }
        }
    }

    Ok(())
}
