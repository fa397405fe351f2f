//! [`Linter`] that runs a configured command, `make lint` by default.

use std::fs::File;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::LintConfig;
use crate::contract::Linter;
use crate::error::ToolError;

pub struct CommandLinter {
    config: LintConfig,
}

impl CommandLinter {
    pub fn new(config: LintConfig) -> Self {
        Self { config }
    }

    fn spawn_err(&self, source: std::io::Error) -> ToolError {
        ToolError::Spawn {
            program: self.config.program.clone(),
            source,
        }
    }
}

#[async_trait]
impl Linter for CommandLinter {
    async fn lint(&self, sink: File) -> Result<(), ToolError> {
        let command = self.config.command_line();
        let stderr = sink.try_clone().map_err(|e| self.spawn_err(e))?;

        tracing::info!(command = %command, dir = %self.config.dir.display(), "Running lint");
        let status = Command::new(&self.config.program)
            .args(&self.config.args)
            .current_dir(&self.config.dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(sink))
            .stderr(Stdio::from(stderr))
            .status()
            .await
            .map_err(|e| self.spawn_err(e))?;

        if status.success() {
            tracing::info!(command = %command, "Lint passed");
            Ok(())
        } else {
            tracing::error!(command = %command, status = ?status, "Lint exited with non-zero code");
            Err(ToolError::Exit {
                command,
                code: status.code(),
            })
        }
    }
}
