/// `load_config` module: reads the optional YAML config file into a
/// [`PipelineConfig`].
///
/// Every key is optional; anything left out keeps its built-in default, and
/// running without `--config` uses the defaults outright. Unknown keys are
/// rejected so a misspelt option fails loudly instead of being ignored.
///
/// # Errors
/// Errors use `anyhow::Error` with the config path attached, and are surfaced
/// at the CLI boundary.
use anyhow::{Context, Result};
use l10n_sync_core::PipelineConfig;
use std::fs;
use std::path::Path;
use tracing::{error, info};

pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = fs::read_to_string(path_ref)
        .inspect_err(|e| error!(error = ?e, config_path = ?path_ref, "Failed to read config file"))
        .with_context(|| format!("Failed to read config file {:?}", path_ref))?;

    // An empty file is `null` to serde_yaml rather than an empty mapping.
    if config_content.trim().is_empty() {
        return Ok(PipelineConfig::default());
    }

    let config: PipelineConfig = serde_yaml::from_str(&config_content)
        .inspect_err(|e| error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML"))
        .with_context(|| format!("Failed to parse config YAML {:?}", path_ref))?;
    info!(config_path = ?path_ref, "Parsed config YAML successfully");

    Ok(config)
}

/// The config at `path`, or the defaults when no path is given.
pub fn load_or_default(path: Option<&Path>) -> Result<PipelineConfig> {
    match path {
        Some(path) => load_config(path),
        None => {
            info!("No config file given, using defaults");
            Ok(PipelineConfig::default())
        }
    }
}
