// src/dispatch/mod.rs

//! Work dispatcher: fan chunks out to the worker pool and join the results.
//!
//! For every dump file this resets a clean per-dump report directory, asks
//! the planner for chunk descriptors, and spawns one execution unit per
//! descriptor onto a [`JoinSet`]. Submission never blocks between chunks;
//! the whole invocation only completes once every unit has been joined
//! ("wait for all, surface first fatal").
//!
//! - [`outcome`] applies the per-outcome policy: failure logging vs.
//!   fail-fast escalation, and trace retention.

pub mod outcome;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::exec::{run_chunk, ChunkOutcome, ExecutionConfig};
use crate::plan::plan_chunks;
use crate::report::{self, ReportTarget};

/// Submit every chunk of every dump file and wait for all of them.
///
/// Side effect only: the report tree on disk plus logged or propagated
/// failures. Dumps that are not regular files are skipped. Chunks of the
/// same dispatch run concurrently and may complete in any order; the only
/// ordering guarantee is that a dump's report directory is reset before any
/// of its chunks is submitted.
///
/// A backend launch fault fails the invocation regardless of policy. A
/// failing chunk fails it only under `fail_fast`; in that case the pool is
/// dropped, which aborts still-pending units and kills their subprocesses.
pub async fn submit_all(
    dumps: &[PathBuf],
    config: ExecutionConfig,
    report_root: &Path,
    chunk_size: Option<u64>,
) -> Result<()> {
    std::fs::create_dir_all(report_root)
        .with_context(|| format!("creating report root {:?}", report_root))?;

    let config = Arc::new(config);
    let mut pool: JoinSet<Result<ChunkOutcome>> = JoinSet::new();
    let mut submitted = 0usize;

    for dump in dumps {
        let meta = match std::fs::metadata(dump) {
            Ok(meta) if meta.is_file() => meta,
            Ok(_) => {
                debug!(dump = %dump.display(), "skipping non-regular file");
                continue;
            }
            Err(err) => {
                warn!(dump = %dump.display(), error = %err, "skipping unreadable dump file");
                continue;
            }
        };

        let dir = report::dump_report_dir(report_root, dump);
        report::reset_report_dir(&dir)?;

        let chunks = plan_chunks(meta.len(), chunk_size);
        info!(
            dump = %dump.display(),
            len = meta.len(),
            chunks = chunks.len(),
            "planned dump file"
        );

        for chunk in chunks {
            let target = ReportTarget::new(report_root, dump, chunk.seek);
            let config = Arc::clone(&config);
            let dump = dump.clone();
            pool.spawn(async move { run_chunk(&config, &dump, chunk, &target).await });
            submitted += 1;
        }
    }

    info!(units = submitted, "all chunks submitted, waiting for completion");

    while let Some(joined) = pool.join_next().await {
        let result = joined.map_err(|err| anyhow!("execution unit panicked: {err}"))?;
        let chunk_outcome = result?;
        outcome::handle_outcome(&chunk_outcome, &config)?;
    }

    Ok(())
}
