#![doc = "l10n-sync-core: core logic library for l10n-sync."]

//! This crate contains the pipeline that keeps the localization working copy
//! in sync, lints it, records a status report and optionally publishes it.
//!
//! # Usage
//! Build a [`pipeline::SyncLintPublish`] from a [`config::PipelineConfig`]
//! and call `run`. The external tools sit behind the traits in [`contract`].

pub mod config;
pub mod contract;
pub mod diagnostics;
pub mod error;
pub mod git;
pub mod lint;
pub mod pipeline;
pub mod report;
pub mod transport;

pub use config::PipelineConfig;
pub use error::{PipelineError, PublishError, ToolError};
pub use pipeline::{PublishDecision, RunReport, Stage, SyncLintPublish};
