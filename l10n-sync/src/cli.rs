///
/// This module implements the CLI interface for l10n-sync: argument parsing
/// and the async entrypoint shared by `main` and the integration tests.
///
/// All pipeline logic lives in the [`l10n-sync-core`] crate. This module is
/// strictly CLI glue: load the config, build the process-backed pipeline,
/// run it once.
///
/// [`l10n-sync-core`]: ../../l10n-sync-core/
use crate::load_config::load_or_default;
use anyhow::Result;
use clap::Parser;
use l10n_sync_core::{RunReport, SyncLintPublish};
use std::path::PathBuf;

/// Sync the localization repository, lint it, record status and optionally
/// push the result to the deployment repository.
#[derive(Parser, Debug)]
#[clap(
    name = "l10n-sync",
    version,
    about = "Sync, lint and optionally publish the localization repository"
)]
pub struct Cli {
    /// Push the linted working copy to the deployment remote
    #[clap(long)]
    pub push: bool,

    /// Path to a YAML config file overriding the built-in defaults
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[clap(short, long)]
    pub verbose: bool,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<RunReport> {
    tracing::info!(push = cli.push, "run_started");

    let config = load_or_default(cli.config.as_deref())?;
    config.trace_loaded();

    let pipeline = SyncLintPublish::from_config(config);
    match pipeline.run(cli.push).await {
        Ok(report) => {
            tracing::info!(command = "sync", ?report, "Run complete");
            Ok(report)
        }
        Err(e) => {
            tracing::error!(command = "sync", error = %e, "Run failed");
            Err(e.into())
        }
    }
}
