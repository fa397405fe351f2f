//! Error types for l10n-sync-core.
//!
//! Every failure is fatal to a run. [`PipelineError`] names the stage that
//! failed and [`PipelineError::exit_code`] turns it into the process exit
//! status, propagating the failing tool's own code where there is one.

use std::path::PathBuf;

use thiserror::Error;

/// Failure of an external process (git, the lint command).
#[derive(Debug, Error)]
pub enum ToolError {
    /// The process could not be started at all.
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran and exited unsuccessfully. `code` is `None` when it
    /// was terminated by a signal.
    #[error("`{command}` exited with {}", describe_code(.code))]
    Exit { command: String, code: Option<i32> },

    /// The process succeeded but its output was not usable.
    #[error("`{command}` produced unusable output: {reason}")]
    InvalidOutput { command: String, reason: String },
}

impl ToolError {
    /// Exit status to report for this failure: the tool's own code when it
    /// fits a process exit status, otherwise 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::Exit {
                code: Some(code), ..
            } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Failure while preparing or performing the push to the deployment remote.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("ssh key not found: {}", .0.display())]
    KeyNotFound(PathBuf),

    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// A fatal pipeline failure, tagged with the stage it came from.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Clone, pull or commit lookup of the working copy failed.
    #[error("repository sync failed: {0}")]
    Sync(#[source] ToolError),

    /// The status report could not be written.
    #[error("failed to write status report {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The lint command failed; its output is already in the status report.
    #[error("lint failed: {0}")]
    Lint(#[source] ToolError),

    #[error("publish failed: {0}")]
    Publish(#[from] PublishError),
}

impl PipelineError {
    /// Process exit status for this failure. Never 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::Sync(e) | PipelineError::Lint(e) => e.exit_code(),
            PipelineError::Publish(PublishError::Tool(e)) => e.exit_code(),
            PipelineError::Publish(PublishError::KeyNotFound(_)) => 1,
            PipelineError::Write { .. } => 1,
        }
    }
}

/// Convenience constructor for [`PipelineError::Write`].
pub(crate) fn write_err(path: impl Into<PathBuf>, source: std::io::Error) -> PipelineError {
    PipelineError::Write {
        path: path.into(),
        source,
    }
}
