use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Output;

use tracing::{debug, info_span};

use crate::error::RenderError;

use super::executor::CommandExecutor;

/// Default renderer binary.
pub const DEFAULT_KUSTOMIZE_BINARY: &str = "kustomize";

/// Build descriptor file names kustomize recognizes, in lookup order. The
/// first one is the name reported when none is present.
pub const DESCRIPTOR_FILE_NAMES: &[&str] =
    &["kustomization.yaml", "kustomization.yml", "Kustomization"];

/// Checks that `source_dir` contains a kustomization file and returns its path.
pub fn verify_descriptor(source_dir: &Path) -> Result<PathBuf, RenderError> {
    for name in DESCRIPTOR_FILE_NAMES {
        let path = source_dir.join(name);
        match path.try_exists() {
            Ok(true) => return Ok(path),
            Ok(false) => continue,
            Err(e) => {
                return Err(RenderError::DescriptorCheck {
                    file: name.to_string(),
                    directory: source_dir.to_path_buf(),
                    source: e,
                })
            }
        }
    }

    Err(RenderError::DescriptorMissing {
        file: DESCRIPTOR_FILE_NAMES[0].to_string(),
        directory: source_dir.to_path_buf(),
    })
}

/// Formats the captured output of a failed command, preferring stderr.
fn format_failure_output(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();

    match (stderr.is_empty(), stdout.is_empty()) {
        (true, true) => String::new(),
        (true, false) => stdout,
        (false, _) => stderr,
    }
}

/// Renders source directories with `kustomize build`.
pub struct Kustomize<E> {
    executor: E,
    binary: String,
}

impl<E: CommandExecutor> Kustomize<E> {
    pub fn new(executor: E) -> Self {
        Self::with_binary(executor, DEFAULT_KUSTOMIZE_BINARY)
    }

    pub fn with_binary(executor: E, binary: impl Into<String>) -> Self {
        Self {
            executor,
            binary: binary.into(),
        }
    }

    /// Runs `kustomize build --enable-helm <abs source_dir>` and returns the
    /// rendered multi-document YAML.
    pub fn build(&self, source_dir: &Path) -> Result<Vec<u8>, RenderError> {
        let _span = info_span!("kustomize_build", source = %source_dir.display()).entered();

        let resolved = self
            .executor
            .look_path(&self.binary)
            .ok_or_else(|| RenderError::BinaryNotFound {
                binary: self.binary.clone(),
            })?;
        debug!(binary = %resolved.display(), "Resolved renderer");

        let abs_path = std::path::absolute(source_dir).map_err(|e| RenderError::AbsolutePath {
            path: source_dir.to_path_buf(),
            source: e,
        })?;

        let args: [&OsStr; 3] = [
            OsStr::new("build"),
            OsStr::new("--enable-helm"),
            abs_path.as_os_str(),
        ];
        let output = self
            .executor
            .exec(&self.binary, &args)
            .map_err(|e| RenderError::Spawn {
                binary: self.binary.clone(),
                directory: source_dir.to_path_buf(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(RenderError::Failed {
                binary: self.binary.clone(),
                directory: source_dir.to_path_buf(),
                status: output.status.to_string(),
                stderr: format_failure_output(&output),
            });
        }

        debug!(bytes = output.stdout.len(), "Rendered manifests");
        Ok(output.stdout)
    }
}
