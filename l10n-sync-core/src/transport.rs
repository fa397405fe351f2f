//! [`SecureTransport`] pointing git's ssh at a dedicated private key.

use std::path::PathBuf;

use crate::contract::{SecureTransport, TransportEnv};
use crate::error::PublishError;

pub const GIT_SSH_COMMAND: &str = "GIT_SSH_COMMAND";

pub struct SshKeyTransport {
    key_path: String,
}

impl SshKeyTransport {
    pub fn new(key_path: impl Into<String>) -> Self {
        Self {
            key_path: key_path.into(),
        }
    }

    /// The configured key path with a leading `~` expanded.
    pub fn resolved_key_path(&self) -> PathBuf {
        expand_home(&self.key_path)
    }
}

impl SecureTransport for SshKeyTransport {
    fn credential_env(&self) -> Result<TransportEnv, PublishError> {
        let key_path = self.resolved_key_path();
        if !key_path.is_file() {
            return Err(PublishError::KeyNotFound(key_path));
        }
        tracing::info!(key = %key_path.display(), "Using dedicated ssh key for push");

        // IdentitiesOnly keeps ssh from offering the user's default keys first.
        let command = format!(
            "ssh -i {} -o IdentitiesOnly=yes",
            shell_quote(&key_path.display().to_string())
        );
        Ok(TransportEnv {
            vars: vec![(GIT_SSH_COMMAND.to_string(), command)],
        })
    }
}

fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        dirs::home_dir().unwrap_or_default()
    } else if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .map(|h| h.join(rest))
            .unwrap_or_else(|| PathBuf::from(path))
    } else {
        PathBuf::from(path)
    }
}

/// Single-quote `value` for the shell git runs `GIT_SSH_COMMAND` through.
fn shell_quote(value: &str) -> String {
    let escaped = value.replace('\'', "'\\''");
    if escaped.starts_with('-') {
        format!("'./{}'", escaped)
    } else {
        format!("'{}'", escaped)
    }
}
