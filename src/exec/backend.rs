// src/exec/backend.rs

//! Backend selection and command-line construction.
//!
//! The branch between running the executable directly and wrapping it in an
//! `srun` submission happens here, once, at the boundary; nothing downstream
//! cares which backend produced the command line.

use std::ffi::OsString;
use std::path::Path;
use std::str::FromStr;

use crate::exec::ExecutionConfig;
use crate::plan::ChunkDescriptor;
use crate::report::ReportTarget;

/// How execution units are launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    /// Run the executable directly as a child process.
    #[default]
    Local,
    /// Submit each invocation through the SLURM `srun` client.
    Slurm,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(BackendKind::Local),
            "slurm" => Ok(BackendKind::Slurm),
            other => Err(format!(
                "invalid backend: {other} (expected \"local\" or \"slurm\")"
            )),
        }
    }
}

/// Wall-clock limit requested for a fresh SLURM allocation.
pub const SLURM_TIME_LIMIT: &str = "12:00:00";

/// Build the full command line for one chunk.
///
/// Returns `(program, args)`. For [`BackendKind::Slurm`] the executable and
/// its arguments are wrapped in an `srun` invocation requesting exactly one
/// task slot; with `slurm_job_id` set, the unit attaches to that allocation
/// via `--jobid` instead of requesting a time limit and job name.
pub fn command_line(
    config: &ExecutionConfig,
    dump: &Path,
    chunk: &ChunkDescriptor,
    target: &ReportTarget,
) -> (OsString, Vec<OsString>) {
    let mut args: Vec<OsString> = Vec::new();

    let program = match config.backend {
        BackendKind::Local => config.executable.as_os_str().to_os_string(),
        BackendKind::Slurm => {
            args.push("--ntasks".into());
            args.push("1".into());
            match config.slurm_job_id {
                Some(id) => {
                    args.push("--jobid".into());
                    args.push(id.to_string().into());
                }
                None => {
                    args.push("--time".into());
                    args.push(SLURM_TIME_LIMIT.into());
                    args.push("--job-name".into());
                    args.push(job_name(&config.executable, dump, chunk.seek).into());
                }
            }
            args.push("--quiet".into());
            args.push(config.executable.as_os_str().to_os_string());
            OsString::from("srun")
        }
    };

    args.push("--dump".into());
    args.push(dump.as_os_str().to_os_string());
    args.push("--dump-seek".into());
    args.push(chunk.seek.to_string().into());
    if let Some(limit) = chunk.limit {
        args.push("--dump-limit".into());
        args.push(limit.to_string().into());
    }
    args.push("--report".into());
    args.push(target.file.as_os_str().to_os_string());
    if config.trace {
        args.push("--c-trace".into());
        args.push(target.c_trace().into_os_string());
        args.push("--d-trace".into());
        args.push(target.d_trace().into_os_string());
    }

    (program, args)
}

/// Human-readable job name for the scheduler queue, naming the executable,
/// dump and offset so a stuck submission can be traced back to its chunk.
fn job_name(executable: &Path, dump: &Path, seek: u64) -> String {
    let exe = executable
        .file_name()
        .unwrap_or(executable.as_os_str())
        .to_string_lossy();
    let dump = dump
        .file_name()
        .unwrap_or(dump.as_os_str())
        .to_string_lossy();
    format!("{exe} {dump}@{seek}")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn config(backend: BackendKind, trace: bool, slurm_job_id: Option<u64>) -> ExecutionConfig {
        ExecutionConfig {
            executable: PathBuf::from("/opt/deflate_test"),
            backend,
            trace,
            fail_fast: false,
            slurm_job_id,
        }
    }

    fn target(seek: u64) -> ReportTarget {
        ReportTarget::new(Path::new("reports"), Path::new("capture.bin"), seek)
    }

    fn strs(args: &[OsString]) -> Vec<String> {
        args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }

    #[test]
    fn local_command_follows_the_argument_contract() {
        let chunk = ChunkDescriptor { seek: 1000, limit: Some(1000) };
        let (program, args) = command_line(
            &config(BackendKind::Local, false, None),
            Path::new("capture.bin"),
            &chunk,
            &target(1000),
        );

        assert_eq!(program, OsString::from("/opt/deflate_test"));
        assert_eq!(
            strs(&args),
            vec![
                "--dump",
                "capture.bin",
                "--dump-seek",
                "1000",
                "--dump-limit",
                "1000",
                "--report",
                "reports/capture.bin/capture.bin_1000",
            ]
        );
    }

    #[test]
    fn whole_file_chunk_omits_the_limit() {
        let chunk = ChunkDescriptor { seek: 0, limit: None };
        let (_, args) = command_line(
            &config(BackendKind::Local, false, None),
            Path::new("capture.bin"),
            &chunk,
            &target(0),
        );

        let args = strs(&args);
        assert!(!args.contains(&"--dump-limit".to_string()));
        assert!(args.contains(&"--dump-seek".to_string()));
    }

    #[test]
    fn trace_adds_both_vcd_paths() {
        let chunk = ChunkDescriptor { seek: 1000, limit: Some(1000) };
        let (_, args) = command_line(
            &config(BackendKind::Local, true, None),
            Path::new("capture.bin"),
            &chunk,
            &target(1000),
        );

        let args = strs(&args);
        let c = args.iter().position(|a| a == "--c-trace").unwrap();
        let d = args.iter().position(|a| a == "--d-trace").unwrap();
        assert_eq!(args[c + 1], "reports/capture.bin/capture.bin_1000_c.vcd");
        assert_eq!(args[d + 1], "reports/capture.bin/capture.bin_1000_d.vcd");
    }

    #[test]
    fn fresh_slurm_submission_requests_slot_time_and_name() {
        let chunk = ChunkDescriptor { seek: 2000, limit: Some(1000) };
        let (program, args) = command_line(
            &config(BackendKind::Slurm, false, None),
            Path::new("/data/capture.bin"),
            &chunk,
            &target(2000),
        );

        assert_eq!(program, OsString::from("srun"));
        let args = strs(&args);
        assert_eq!(args[0], "--ntasks");
        assert_eq!(args[1], "1");
        assert!(args.contains(&"--time".to_string()));
        assert!(args.contains(&SLURM_TIME_LIMIT.to_string()));
        assert!(args.contains(&"--job-name".to_string()));
        assert!(args.contains(&"deflate_test capture.bin@2000".to_string()));
        assert!(args.contains(&"--quiet".to_string()));
        // The wrapped executable comes after the srun options.
        let exe = args.iter().position(|a| a == "/opt/deflate_test").unwrap();
        let quiet = args.iter().position(|a| a == "--quiet").unwrap();
        assert!(exe > quiet);
    }

    #[test]
    fn attaching_to_a_job_id_omits_time_limit_and_job_name() {
        let chunk = ChunkDescriptor { seek: 0, limit: Some(1000) };
        let (program, args) = command_line(
            &config(BackendKind::Slurm, false, Some(4242)),
            Path::new("capture.bin"),
            &chunk,
            &target(0),
        );

        assert_eq!(program, OsString::from("srun"));
        let args = strs(&args);
        let jobid = args.iter().position(|a| a == "--jobid").unwrap();
        assert_eq!(args[jobid + 1], "4242");
        assert!(!args.contains(&"--time".to_string()));
        assert!(!args.contains(&"--job-name".to_string()));
        assert!(args.contains(&"--quiet".to_string()));
    }

    #[test]
    fn backend_kind_parses_case_insensitively() {
        assert_eq!("local".parse::<BackendKind>(), Ok(BackendKind::Local));
        assert_eq!(" SLURM ".parse::<BackendKind>(), Ok(BackendKind::Slurm));
        assert!("pbs".parse::<BackendKind>().is_err());
    }
}
