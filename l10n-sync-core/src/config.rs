use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

pub const DEFAULT_WORKING_COPY_PATH: &str = "locale";
pub const DEFAULT_STATUS_REPORT_PATH: &str = "media/postatus.txt";
pub const DEFAULT_SOURCE_REMOTE_URL: &str = "https://github.com/mozilla-l10n/sumo-l10n.git";
pub const DEFAULT_DEPLOYMENT_REMOTE_URL: &str = "git@github.com:mozilla-l10n/sumo-l10n-prod.git";
pub const DEFAULT_SSH_KEY_PATH: &str = "~/.ssh/id_rsa-sumo-l10n-prod";

/// Everything a pipeline run needs to know about its environment.
///
/// Relative paths resolve against the process working directory. Every field
/// has a default, so an empty YAML document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Local clone of the localization repository.
    pub working_copy_path: PathBuf,
    /// Status file overwritten on every run.
    pub status_report_path: PathBuf,
    /// Repository cloned or pulled into the working copy.
    pub source_remote_url: String,
    /// Repository the working copy is pushed to under `--push`.
    pub deployment_remote_url: String,
    /// Private key used for the push only. A leading `~` is expanded.
    pub ssh_key_path: String,
    pub lint: LintConfig,
    /// Log a listing of the home directory before configuring the push key.
    pub list_home_before_push: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            working_copy_path: PathBuf::from(DEFAULT_WORKING_COPY_PATH),
            status_report_path: PathBuf::from(DEFAULT_STATUS_REPORT_PATH),
            source_remote_url: DEFAULT_SOURCE_REMOTE_URL.to_string(),
            deployment_remote_url: DEFAULT_DEPLOYMENT_REMOTE_URL.to_string(),
            ssh_key_path: DEFAULT_SSH_KEY_PATH.to_string(),
            lint: LintConfig::default(),
            list_home_before_push: true,
        }
    }
}

/// The lint command: `program args...` run from `dir`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    pub program: String,
    pub args: Vec<String>,
    pub dir: PathBuf,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            program: "make".to_string(),
            args: vec!["lint".to_string()],
            dir: PathBuf::from("."),
        }
    }
}

impl LintConfig {
    /// The command line as a single string, for logs and error messages.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl PipelineConfig {
    pub fn trace_loaded(&self) {
        info!(
            working_copy = %self.working_copy_path.display(),
            status_report = %self.status_report_path.display(),
            source_remote = %self.source_remote_url,
            deployment_remote = %self.deployment_remote_url,
            lint = %self.lint.command_line(),
            "Loaded Config"
        );
        debug!(?self, "Config loaded (full debug)");
    }
}
