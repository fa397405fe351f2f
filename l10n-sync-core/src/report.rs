//! The status report: a plain text file holding the commit hash of the
//! working copy followed by the lint output.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::error::{write_err, PipelineError};

pub const HASH_HEADER_PREFIX: &str = "l10n git hash: ";

/// The header line plus the blank line that separates it from lint output.
pub fn header(hash: &str) -> String {
    format!("{HASH_HEADER_PREFIX}{hash}\n\n")
}

#[derive(Debug, Clone)]
pub struct StatusReport {
    path: PathBuf,
}

impl StatusReport {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace any previous report with the header for `hash`.
    pub fn initialize(&self, hash: &str) -> Result<(), PipelineError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| write_err(parent, e))?;
        }
        fs::write(&self.path, header(hash)).map_err(|e| write_err(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), hash, "Initialised status report");
        Ok(())
    }

    /// Handle positioned at the end of the report, for lint output.
    pub fn open_append(&self) -> Result<File, PipelineError> {
        OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| write_err(&self.path, e))
    }
}

/// Commit hash recorded in a report's header, if it has one.
pub fn recorded_hash(content: &str) -> Option<&str> {
    content.lines().next()?.strip_prefix(HASH_HEADER_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn initialize_overwrites_previous_content() {
        let dir = TempDir::new().unwrap();
        let report = StatusReport::new(dir.path().join("postatus.txt"));
        fs::write(report.path(), "stale report from last run\n").unwrap();

        report.initialize("abc123").unwrap();

        assert_eq!(
            fs::read_to_string(report.path()).unwrap(),
            "l10n git hash: abc123\n\n"
        );
    }

    #[test]
    fn initialize_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let report = StatusReport::new(dir.path().join("media").join("postatus.txt"));
        report.initialize("abc123").unwrap();
        assert!(report.path().is_file());
    }

    #[test]
    fn appended_output_follows_header() {
        let dir = TempDir::new().unwrap();
        let report = StatusReport::new(dir.path().join("postatus.txt"));
        report.initialize("abc123").unwrap();

        let mut file = report.open_append().unwrap();
        file.write_all(b"OK: 0 issues\n").unwrap();
        drop(file);

        let content = fs::read_to_string(report.path()).unwrap();
        assert_eq!(content, "l10n git hash: abc123\n\nOK: 0 issues\n");
        assert_eq!(recorded_hash(&content), Some("abc123"));
    }

    #[test]
    fn unwritable_path_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        // A directory where the file should be.
        let report = StatusReport::new(dir.path());
        let err = report.initialize("abc123").unwrap_err();
        assert!(matches!(err, PipelineError::Write { .. }));
    }

    #[test]
    fn recorded_hash_requires_header() {
        assert_eq!(recorded_hash("OK: 0 issues\n"), None);
        assert_eq!(recorded_hash(""), None);
    }
}
