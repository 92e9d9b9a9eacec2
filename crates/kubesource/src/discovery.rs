use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

use crate::config::CONFIG_FILE_NAME;
use crate::error::DiscoveryError;

/// Finds every directory under `root` that contains a `kubesource.yaml`.
///
/// Returns the directories sorted and deduplicated. Hidden directories
/// (e.g. `.git`) below `root` are not descended into, and symlinked
/// directories are not followed.
pub fn find_directories<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, DiscoveryError> {
    let root = root.as_ref();
    let mut directories = BTreeSet::new();

    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = entry.map_err(|e| DiscoveryError::Walk {
            path: e.path().unwrap_or(root).to_path_buf(),
            source: e,
        })?;

        if entry.file_type().is_dir() || entry.file_name() != CONFIG_FILE_NAME {
            continue;
        }

        if let Some(parent) = entry.path().parent() {
            debug!(directory = %parent.display(), "Found {}", CONFIG_FILE_NAME);
            directories.insert(parent.to_path_buf());
        }
    }

    info!(
        "Discovered {} kubesource directories in {}",
        directories.len(),
        root.display()
    );
    Ok(directories.into_iter().collect())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}
