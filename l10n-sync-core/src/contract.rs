//! # contract: capability interfaces for the external tools
//!
//! The pipeline never shells out directly. It talks to three traits:
//!
//! - [`VersionControl`]: clone, fast-forward pull, commit lookup and push.
//! - [`Linter`]: run the lint pass, writing its combined output to a file.
//! - [`SecureTransport`]: produce the environment that points the push at a
//!   dedicated SSH key.
//!
//! Process-backed implementations live in [`crate::git`], [`crate::lint`] and
//! [`crate::transport`]. Every trait is annotated for `mockall`, and the mocks
//! are exported under the default `test-export-mocks` feature so downstream
//! crates can drive the pipeline without subprocesses or network access.

use std::fs::File;
use std::path::Path;

use async_trait::async_trait;
use mockall::automock;

use crate::error::{PublishError, ToolError};

/// Environment variables applied to the push process, and only to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportEnv {
    pub vars: Vec<(String, String)>,
}

impl TransportEnv {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Version-control operations on the working copy.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait VersionControl: Send + Sync {
    /// Whether `path` already holds a repository.
    fn is_repository(&self, path: &Path) -> bool;

    /// Clone `remote` into `path`.
    async fn clone_repo(&self, remote: &str, path: &Path) -> Result<(), ToolError>;

    /// Fast-forward `path` to the state of `remote`. Never merges.
    async fn pull(&self, path: &Path, remote: &str) -> Result<(), ToolError>;

    /// Identifier of the commit currently checked out in `path`.
    async fn head_commit(&self, path: &Path) -> Result<String, ToolError>;

    /// Push the current branch of `path` to `remote` with `env` applied.
    async fn push(&self, path: &Path, remote: &str, env: &TransportEnv) -> Result<(), ToolError>;
}

/// The lint pass over the localization data.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait Linter: Send + Sync {
    /// Run the lint pass with stdout and stderr both written to `sink`.
    ///
    /// A non-zero exit is reported as [`ToolError::Exit`]; warnings printed by
    /// a run that exits 0 are not an error.
    async fn lint(&self, sink: File) -> Result<(), ToolError>;
}

/// Credentials for the push to the deployment remote.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
pub trait SecureTransport: Send + Sync {
    fn credential_env(&self) -> Result<TransportEnv, PublishError>;
}
