//! Home directory listing logged before the push key is configured.
//!
//! Audit output only: nothing here can fail a run.

use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub len: u64,
}

/// Entries of `dir`, hidden files included, sorted by name.
pub fn list_dir(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let metadata = entry.metadata()?;
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir: metadata.is_dir(),
            len: metadata.len(),
        });
    }
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Log every entry of the invoking user's home directory.
pub fn log_home_listing() {
    let Some(home) = dirs::home_dir() else {
        tracing::warn!("No home directory found; skipping listing");
        return;
    };

    match list_dir(&home) {
        Ok(entries) => {
            tracing::info!(home = %home.display(), entries = entries.len(), "Home directory listing");
            for entry in &entries {
                let kind = if entry.is_dir { "d" } else { "-" };
                tracing::info!("{} {:>10} {}", kind, entry.len, entry.name);
            }
        }
        Err(e) => {
            tracing::warn!(home = %home.display(), error = %e, "Failed to list home directory");
        }
    }
}
