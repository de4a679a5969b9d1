#![allow(dead_code)]

//! Shared helpers for integration tests: fake test executables backed by
//! shell scripts.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use dumprun::exec::{BackendKind, ExecutionConfig};

/// Write an executable shell script and return its path.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("writing script");
    let mut perms = fs::metadata(&path)
        .expect("script metadata")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("marking script executable");
    path
}

/// A fake test executable honouring the dispatch argument contract: it
/// creates its report file, touches the trace files when asked to produce
/// them, and exits with `exit_code`.
pub fn write_fake_executable(dir: &Path, exit_code: i32) -> PathBuf {
    write_script(
        dir,
        "fake_test_exe",
        &format!(
            r#"report=""
ctrace=""
dtrace=""
while [ $# -gt 0 ]; do
  case "$1" in
    --report) report="$2"; shift 2 ;;
    --c-trace) ctrace="$2"; shift 2 ;;
    --d-trace) dtrace="$2"; shift 2 ;;
    *) shift ;;
  esac
done
[ -n "$report" ] && : > "$report"
[ -n "$ctrace" ] && : > "$ctrace"
[ -n "$dtrace" ] && : > "$dtrace"
exit {exit_code}"#
        ),
    )
}

/// An `ExecutionConfig` for the local backend.
pub fn local_config(executable: PathBuf, trace: bool, fail_fast: bool) -> ExecutionConfig {
    ExecutionConfig {
        executable,
        backend: BackendKind::Local,
        trace,
        fail_fast,
        slurm_job_id: None,
    }
}
