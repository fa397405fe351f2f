//! High-level pipeline: orchestrates sync → report → lint → publish for the
//! localization working copy.
//!
//! A run moves strictly forward through four stages:
//!   - Acquire the working copy: clone it when absent, otherwise pull with
//!     fast-forward only
//!   - Record the checked-out commit as the header of the status report,
//!     discarding the previous report
//!   - Run the lint command with its combined output appended to the report
//!   - Push the working copy to the deployment remote, only when requested
//!     and everything before it succeeded
//!
//! # Error Handling
//! The first failure ends the run and is returned as a [`PipelineError`];
//! nothing is retried. A lint failure leaves the header and whatever the lint
//! command printed in the report, which is what downstream consumers read.
//!
//! # Navigation
//! - Main entrypoint: [`SyncLintPublish::run`]
//! - Supporting types: [`Stage`], [`PublishDecision`], [`RunReport`]

use std::path::PathBuf;

use tracing::{error, info, Instrument};

use crate::config::PipelineConfig;
use crate::contract::{Linter, SecureTransport, VersionControl};
use crate::diagnostics;
use crate::error::{PipelineError, PublishError};
use crate::git::GitCli;
use crate::lint::CommandLinter;
use crate::report::StatusReport;
use crate::transport::SshKeyTransport;

/// Position of a run in `Start → Synced → Reported → Linted → (Published |
/// Skipped)`. Any failure goes straight to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Synced,
    Reported,
    Linted,
    Published,
    Skipped,
    Failed,
}

/// Whether the publish stage runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishDecision {
    Publish,
    Skip,
}

impl PublishDecision {
    pub fn decide(push_requested: bool, lint_succeeded: bool) -> Self {
        if push_requested && lint_succeeded {
            PublishDecision::Publish
        } else {
            PublishDecision::Skip
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug)]
pub struct RunReport {
    pub commit_hash: String,
    pub status_report: PathBuf,
    pub publish: PublishDecision,
    pub stage: Stage,
}

pub struct SyncLintPublish<V, L, T> {
    config: PipelineConfig,
    vcs: V,
    linter: L,
    transport: T,
}

impl SyncLintPublish<GitCli, CommandLinter, SshKeyTransport> {
    /// Pipeline backed by the real `git`, lint command and ssh key.
    pub fn from_config(config: PipelineConfig) -> Self {
        let linter = CommandLinter::new(config.lint.clone());
        let transport = SshKeyTransport::new(config.ssh_key_path.clone());
        Self::new(config, GitCli::new(), linter, transport)
    }
}

impl<V, L, T> SyncLintPublish<V, L, T>
where
    V: VersionControl,
    L: Linter,
    T: SecureTransport,
{
    pub fn new(config: PipelineConfig, vcs: V, linter: L, transport: T) -> Self {
        Self {
            config,
            vcs,
            linter,
            transport,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage once, stopping at the first failure.
    pub async fn run(&self, push_requested: bool) -> Result<RunReport, PipelineError> {
        let span = tracing::info_span!("pipeline", push_requested);
        async {
            info!(stage = ?Stage::Start, "[PIPELINE] Starting sync/lint/publish run");
            let result = self.run_stages(push_requested).await;
            if let Err(e) = &result {
                error!(
                    stage = ?Stage::Failed,
                    error = %e,
                    exit_code = e.exit_code(),
                    "[PIPELINE][ERROR] Run failed"
                );
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_stages(&self, push_requested: bool) -> Result<RunReport, PipelineError> {
        self.acquire_working_copy().await?;
        info!(stage = ?Stage::Synced, "[PIPELINE] Working copy is up to date");

        let report = StatusReport::new(&self.config.status_report_path);
        let commit_hash = self.record_provenance(&report).await?;
        info!(stage = ?Stage::Reported, hash = %commit_hash, "[PIPELINE] Status report initialised");

        self.lint(&report).await?;
        info!(stage = ?Stage::Linted, "[PIPELINE] Lint succeeded");

        let publish = PublishDecision::decide(push_requested, true);
        let stage = match publish {
            PublishDecision::Publish => {
                self.publish().await?;
                info!(stage = ?Stage::Published, remote = %self.config.deployment_remote_url, "[PIPELINE] Published");
                Stage::Published
            }
            PublishDecision::Skip => {
                info!(stage = ?Stage::Skipped, "[PIPELINE] Publish not requested, skipping push");
                Stage::Skipped
            }
        };

        Ok(RunReport {
            commit_hash,
            status_report: report.path().to_path_buf(),
            publish,
            stage,
        })
    }

    async fn acquire_working_copy(&self) -> Result<(), PipelineError> {
        let path = &self.config.working_copy_path;
        let remote = &self.config.source_remote_url;

        let result = if self.vcs.is_repository(path) {
            info!(path = %path.display(), remote = %remote, "[PIPELINE][SYNC] Pulling existing working copy");
            self.vcs.pull(path, remote).await
        } else {
            info!(path = %path.display(), remote = %remote, "[PIPELINE][SYNC] No working copy, cloning");
            self.vcs.clone_repo(remote, path).await
        };
        result.map_err(PipelineError::Sync)
    }

    async fn record_provenance(&self, report: &StatusReport) -> Result<String, PipelineError> {
        let hash = self
            .vcs
            .head_commit(&self.config.working_copy_path)
            .await
            .map_err(PipelineError::Sync)?;
        report.initialize(&hash)?;
        Ok(hash)
    }

    async fn lint(&self, report: &StatusReport) -> Result<(), PipelineError> {
        let sink = report.open_append()?;
        self.linter.lint(sink).await.map_err(PipelineError::Lint)
    }

    async fn publish(&self) -> Result<(), PipelineError> {
        if self.config.list_home_before_push {
            diagnostics::log_home_listing();
        }

        let env = self.transport.credential_env()?;
        self.vcs
            .push(
                &self.config.working_copy_path,
                &self.config.deployment_remote_url,
                &env,
            )
            .await
            .map_err(|e| PipelineError::Publish(PublishError::Tool(e)))
    }
}
