// src/report.rs

//! Report-tree bookkeeping: per-dump directories and per-chunk file naming.
//!
//! Layout: `<report_root>/<dump base name>/<dump base name>_<seek>`, with
//! trace siblings `<report file>_c.vcd` and `<report file>_d.vcd`. Names are
//! unique per (dump, seek) by construction, so concurrent chunks never write
//! to the same path.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Per-dump report directory: `<report_root>/<dump base name>`.
pub fn dump_report_dir(report_root: &Path, dump: &Path) -> PathBuf {
    let base = dump.file_name().unwrap_or(dump.as_os_str());
    report_root.join(base)
}

/// Destination paths for one chunk's report and trace artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTarget {
    /// Per-dump report directory.
    pub dir: PathBuf,
    /// Report file for this chunk.
    pub file: PathBuf,
}

impl ReportTarget {
    pub fn new(report_root: &Path, dump: &Path, seek: u64) -> Self {
        let dir = dump_report_dir(report_root, dump);
        let base = dump.file_name().unwrap_or(dump.as_os_str());
        let mut name = base.to_os_string();
        name.push(format!("_{seek}"));
        let file = dir.join(name);
        Self { dir, file }
    }

    /// Compressor-side trace file (`<report>_c.vcd`).
    pub fn c_trace(&self) -> PathBuf {
        append_suffix(&self.file, "_c.vcd")
    }

    /// Decompressor-side trace file (`<report>_d.vcd`).
    pub fn d_trace(&self) -> PathBuf {
        append_suffix(&self.file, "_d.vcd")
    }
}

fn append_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s: OsString = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

/// Delete and recreate a per-dump report directory.
///
/// Must run before any chunk of that dump is submitted, so reports left by a
/// previous run cannot be mistaken for current results.
pub fn reset_report_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        debug!(dir = %dir.display(), "removing stale report directory");
        fs::remove_dir_all(dir)
            .with_context(|| format!("removing stale report directory {:?}", dir))?;
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("creating report directory {:?}", dir))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_file_is_named_after_dump_and_seek() {
        let target = ReportTarget::new(
            Path::new("/tmp/reports"),
            Path::new("/data/capture.bin"),
            2000,
        );
        assert_eq!(target.dir, PathBuf::from("/tmp/reports/capture.bin"));
        assert_eq!(
            target.file,
            PathBuf::from("/tmp/reports/capture.bin/capture.bin_2000")
        );
    }

    #[test]
    fn trace_files_are_report_siblings() {
        let target =
            ReportTarget::new(Path::new("reports"), Path::new("dump.bin"), 0);
        assert_eq!(
            target.c_trace(),
            PathBuf::from("reports/dump.bin/dump.bin_0_c.vcd")
        );
        assert_eq!(
            target.d_trace(),
            PathBuf::from("reports/dump.bin/dump.bin_0_d.vcd")
        );
    }

    #[test]
    fn reset_clears_previous_contents() -> Result<()> {
        let root = tempfile::tempdir()?;
        let dir = root.path().join("capture.bin");
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("capture.bin_0"), b"stale")?;

        reset_report_dir(&dir)?;

        assert!(dir.exists());
        assert_eq!(fs::read_dir(&dir)?.count(), 0);
        Ok(())
    }

    #[test]
    fn reset_creates_missing_directory() -> Result<()> {
        let root = tempfile::tempdir()?;
        let dir = root.path().join("new.bin");

        reset_report_dir(&dir)?;

        assert!(dir.is_dir());
        Ok(())
    }
}
