use std::path::PathBuf;

use crate::error::KubesourceError;

/// Outcome of writing one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReport {
    pub directory: PathBuf,
    /// Number of manifest files written, not counting the index.
    pub manifests: usize,
    pub collisions: Vec<String>,
}

/// Outcome of a whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Directories that were processed without error.
    pub directories: Vec<PathBuf>,
    pub targets: Vec<TargetReport>,
    /// Failed directories, only populated under `FailurePolicy::Continue`.
    pub failures: Vec<KubesourceError>,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn manifests_written(&self) -> usize {
        self.targets.iter().map(|t| t.manifests).sum()
    }

    pub fn collisions(&self) -> usize {
        self.targets.iter().map(|t| t.collisions.len()).sum()
    }
}
