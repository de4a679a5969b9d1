// src/exec/command.rs

//! Subprocess invocation for one chunk.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use rand::Rng;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

use crate::errors::{DumprunError, Result};
use crate::exec::backend::{command_line, BackendKind};
use crate::exec::ExecutionConfig;
use crate::plan::ChunkDescriptor;
use crate::report::ReportTarget;

/// Upper bound on the random delay before an `srun` submission.
const MAX_SUBMIT_JITTER_MS: u64 = 60_000;

/// Outcome of one execution unit.
#[derive(Debug, Clone)]
pub struct ChunkOutcome {
    pub dump: PathBuf,
    pub chunk: ChunkDescriptor,
    pub exit_code: i32,
    /// Trace files the executable was asked to write (empty unless tracing
    /// was enabled). They exist only if the executable produced them.
    pub trace_files: Vec<PathBuf>,
}

impl ChunkOutcome {
    pub fn passed(&self) -> bool {
        self.exit_code == 0
    }
}

/// Run the test executable against one chunk and capture its exit status.
///
/// A non-zero exit is part of the normal outcome here; only failing to
/// launch the program (or the `srun` client) is an error, and that is fatal
/// for the whole dispatch regardless of the fail-fast policy.
pub async fn run_chunk(
    config: &ExecutionConfig,
    dump: &Path,
    chunk: ChunkDescriptor,
    target: &ReportTarget,
) -> Result<ChunkOutcome> {
    // Spread independent submissions out so a large dispatch does not hit
    // the scheduler controller as one burst. An explicit job id means the
    // allocation is already reserved and there is nothing to protect.
    if config.backend == BackendKind::Slurm && config.slurm_job_id.is_none() {
        let delay = {
            let mut rng = rand::thread_rng();
            Duration::from_millis(rng.gen_range(0..MAX_SUBMIT_JITTER_MS))
        };
        debug!(dump = %dump.display(), seek = chunk.seek, ?delay, "submission jitter");
        sleep(delay).await;
    }

    let (program, args) = command_line(config, dump, &chunk, target);

    info!(
        dump = %dump.display(),
        seek = chunk.seek,
        program = %program.to_string_lossy(),
        "starting chunk process"
    );

    let mut cmd = Command::new(&program);
    cmd.args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|source| DumprunError::Launch {
        program: program.to_string_lossy().into_owned(),
        source,
    })?;

    // Drain both pipes so the child can never block on a full buffer.
    spawn_drain(child.stdout.take(), dump.to_path_buf(), chunk.seek, "stdout");
    spawn_drain(child.stderr.take(), dump.to_path_buf(), chunk.seek, "stderr");

    let status = child.wait().await?;
    let exit_code = status.code().unwrap_or(-1);

    info!(
        dump = %dump.display(),
        seek = chunk.seek,
        exit_code,
        success = status.success(),
        "chunk process exited"
    );

    let trace_files = if config.trace {
        vec![target.c_trace(), target.d_trace()]
    } else {
        Vec::new()
    };

    Ok(ChunkOutcome {
        dump: dump.to_path_buf(),
        chunk,
        exit_code,
        trace_files,
    })
}

/// Log a child output stream line by line at debug level.
fn spawn_drain<R>(stream: Option<R>, dump: PathBuf, seek: u64, label: &'static str)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let Some(stream) = stream else {
        return;
    };
    tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            debug!(dump = %dump.display(), seek, "{label}: {line}");
        }
    });
}
