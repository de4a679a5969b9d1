// src/lib.rs

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod plan;
pub mod report;

use std::fs;

use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::RunSpec;
use crate::errors::Result;
use crate::exec::{command_line, ExecutionConfig};
use crate::plan::plan_chunks;
use crate::report::ReportTarget;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config resolution (CLI flags over the optional `Dumprun.toml`)
/// - the dry-run printer
/// - the work dispatcher
pub async fn run(args: CliArgs) -> Result<()> {
    let spec = config::resolve(&args)?;
    let exec_config = spec.execution_config();

    if args.dry_run {
        print_dry_run(&spec, &exec_config);
        return Ok(());
    }

    info!(
        executable = %spec.executable.display(),
        dumps = spec.dumps.len(),
        backend = ?spec.backend,
        "starting dispatch"
    );

    dispatch::submit_all(&spec.dumps, exec_config, &spec.report_dir, spec.chunk_size).await
}

/// Dry-run output: the planned chunk invocations, one per line, without
/// touching the report tree or spawning anything.
fn print_dry_run(spec: &RunSpec, exec_config: &ExecutionConfig) {
    println!("dumprun dry-run");

    for dump in &spec.dumps {
        let meta = match fs::metadata(dump) {
            Ok(meta) if meta.is_file() => meta,
            _ => {
                println!("  {} (skipped: not a regular file)", dump.display());
                continue;
            }
        };

        let chunks = plan_chunks(meta.len(), spec.chunk_size);
        println!(
            "  {} ({} bytes, {} chunks):",
            dump.display(),
            meta.len(),
            chunks.len()
        );

        for chunk in chunks {
            let target = ReportTarget::new(&spec.report_dir, dump, chunk.seek);
            let (program, args) = command_line(exec_config, dump, &chunk, &target);
            let rendered: Vec<String> = args
                .iter()
                .map(|a| a.to_string_lossy().into_owned())
                .collect();
            println!("    {} {}", program.to_string_lossy(), rendered.join(" "));
        }
    }

    debug!("dry-run complete (no execution)");
}
