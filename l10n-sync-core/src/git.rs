//! [`VersionControl`] backed by the `git` command line.
//!
//! Clone, pull and push inherit stdio so git's own progress and error text
//! reach the terminal unchanged. Only `rev-parse` output is captured.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::contract::{TransportEnv, VersionControl};
use crate::error::ToolError;

pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    fn command_line<S: AsRef<OsStr>>(&self, args: &[S]) -> String {
        std::iter::once(self.program.clone())
            .chain(args.iter().map(|a| a.as_ref().to_string_lossy().into_owned()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn spawn_err(&self, source: std::io::Error) -> ToolError {
        ToolError::Spawn {
            program: self.program.clone(),
            source,
        }
    }

    /// Run git to completion with inherited stdio.
    async fn run<S: AsRef<OsStr>>(
        &self,
        args: &[S],
        env: &[(String, String)],
    ) -> Result<(), ToolError> {
        let command = self.command_line(args);
        tracing::debug!(command = %command, "Running git");

        let status = Command::new(&self.program)
            .args(args)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| self.spawn_err(e))?;

        if status.success() {
            Ok(())
        } else {
            tracing::error!(command = %command, status = ?status, "Git exited with non-zero code");
            Err(ToolError::Exit {
                command,
                code: status.code(),
            })
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VersionControl for GitCli {
    fn is_repository(&self, path: &Path) -> bool {
        path.join(".git").exists()
    }

    async fn clone_repo(&self, remote: &str, path: &Path) -> Result<(), ToolError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| self.spawn_err(e))?;
                tracing::debug!(path = %parent.display(), "Created parent directory for clone");
            }
        }
        self.run(&[OsStr::new("clone"), OsStr::new(remote), path.as_os_str()], &[])
            .await?;
        tracing::info!(repo_url = remote, path = %path.display(), "Successfully cloned git repository");
        Ok(())
    }

    async fn pull(&self, path: &Path, remote: &str) -> Result<(), ToolError> {
        self.run(
            &[
                OsStr::new("-C"),
                path.as_os_str(),
                OsStr::new("pull"),
                OsStr::new("--ff-only"),
                OsStr::new(remote),
            ],
            &[],
        )
        .await?;
        tracing::info!(repo_url = remote, path = %path.display(), "Pulled git repository");
        Ok(())
    }

    async fn head_commit(&self, path: &Path) -> Result<String, ToolError> {
        let args = [
            OsStr::new("-C"),
            path.as_os_str(),
            OsStr::new("rev-parse"),
            OsStr::new("HEAD"),
        ];
        let command = self.command_line(&args);

        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|e| self.spawn_err(e))?;

        if !output.status.success() {
            return Err(ToolError::Exit {
                command,
                code: output.status.code(),
            });
        }

        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if hash.is_empty() {
            return Err(ToolError::InvalidOutput {
                command,
                reason: "empty commit identifier".to_string(),
            });
        }
        Ok(hash)
    }

    async fn push(&self, path: &Path, remote: &str, env: &TransportEnv) -> Result<(), ToolError> {
        self.run(
            &[
                OsStr::new("-C"),
                path.as_os_str(),
                OsStr::new("push"),
                OsStr::new(remote),
                OsStr::new("HEAD"),
            ],
            &env.vars,
        )
        .await?;
        tracing::info!(remote = remote, path = %path.display(), "Pushed working copy");
        Ok(())
    }
}
