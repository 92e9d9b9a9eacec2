use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, info_span};

use crate::config::{load_config, Source, Target};
use crate::discovery::find_directories;
use crate::error::{KubesourceError, Result};
use crate::manifest::{parse_documents, ParsedDocument};
use crate::output::build_output_set;
use crate::render::{verify_descriptor, CommandExecutor, Kustomize};
use crate::storage::TargetWriter;

use super::options::{FailurePolicy, PipelineOptions};
use super::summary::{RunSummary, TargetReport};

/// Drives discovery, rendering, filtering and writing for a tree of
/// `kubesource.yaml` directories.
pub struct Pipeline<E> {
    renderer: Kustomize<E>,
    failure_policy: FailurePolicy,
    cancelled: Arc<AtomicBool>,
}

impl<E: CommandExecutor> Pipeline<E> {
    pub fn new(executor: E, options: PipelineOptions) -> Self {
        Self {
            renderer: Kustomize::with_binary(executor, options.kustomize_binary),
            failure_policy: options.failure_policy,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shares `flag` as the cancellation signal. Setting it stops the run at
    /// the next directory, source or target boundary.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancelled = flag;
        self
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    fn check_cancelled(&self) -> Result<()> {
        if self.cancelled.load(Ordering::SeqCst) {
            return Err(KubesourceError::Cancelled);
        }
        Ok(())
    }

    /// Processes every directory under `root` that holds a `kubesource.yaml`.
    pub fn run(&self, root: &Path) -> Result<RunSummary> {
        let _span = info_span!("run", root = %root.display()).entered();

        let directories = find_directories(root)?;
        let mut summary = RunSummary::default();

        for directory in &directories {
            self.check_cancelled()?;

            match self.process_directory(directory) {
                Ok(reports) => {
                    summary.directories.push(directory.clone());
                    summary.targets.extend(reports);
                }
                Err(e) if e.is_cancelled() => return Err(e),
                Err(e) => match self.failure_policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Continue => {
                        error!("{}", e);
                        summary.failures.push(e);
                    }
                },
            }
        }

        info!(
            directories = summary.directories.len(),
            targets = summary.targets.len(),
            manifests = summary.manifests_written(),
            failures = summary.failures.len(),
            "Run finished"
        );
        Ok(summary)
    }

    /// Loads the config in `directory` and processes its sources in order,
    /// returning one report per written target.
    pub fn process_directory(&self, directory: &Path) -> Result<Vec<TargetReport>> {
        let _span = info_span!("directory", path = %directory.display()).entered();
        info!("Processing directory");

        let mut reports = Vec::new();
        let result = load_config(directory)
            .map_err(KubesourceError::from)
            .and_then(|config| {
                for source in &config.sources {
                    self.check_cancelled()?;
                    self.process_source(directory, source, &mut reports)?;
                }
                Ok(())
            });

        result
            .map(|()| reports)
            .map_err(|e| e.in_directory(directory))
    }

    fn process_source(
        &self,
        base: &Path,
        source: &Source,
        reports: &mut Vec<TargetReport>,
    ) -> Result<()> {
        let source_dir = base.join(&source.source_dir);
        let _span = info_span!("source", path = %source_dir.display()).entered();

        let result = self.render_source(&source_dir).and_then(|documents| {
            info!(documents = documents.len(), "Rendered source");
            for target in &source.targets {
                self.check_cancelled()?;
                reports.push(self.process_target(base, target, &documents)?);
            }
            Ok(())
        });

        result.map_err(|e| e.in_source(&source_dir))
    }

    fn render_source(&self, source_dir: &Path) -> Result<Vec<ParsedDocument>> {
        verify_descriptor(source_dir)?;
        let rendered = self.renderer.build(source_dir)?;
        let documents = parse_documents(&rendered, &source_dir.display().to_string())?;
        Ok(documents)
    }

    fn process_target(
        &self,
        base: &Path,
        target: &Target,
        documents: &[ParsedDocument],
    ) -> Result<TargetReport> {
        let target_dir = base.join(&target.directory);
        let _span = info_span!("target", path = %target_dir.display()).entered();

        let write = || -> Result<TargetReport> {
            let output = build_output_set(documents, target.filter.as_ref())?;
            TargetWriter::new(&target_dir).write(&output)?;
            info!(manifests = output.manifest_count(), "Wrote target");

            Ok(TargetReport {
                directory: target_dir.clone(),
                manifests: output.manifest_count(),
                collisions: output.collisions().to_vec(),
            })
        };

        write().map_err(|e| e.in_target(&target_dir))
    }
}
