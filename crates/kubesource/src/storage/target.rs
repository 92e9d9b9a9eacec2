use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StorageError;
use crate::output::OutputSet;

#[cfg(unix)]
const DIRECTORY_MODE: u32 = 0o755;
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Replaces the contents of a target directory with an [`OutputSet`].
pub struct TargetWriter {
    target_directory: PathBuf,
}

impl TargetWriter {
    pub fn new<P: AsRef<Path>>(target_directory: P) -> Self {
        Self {
            target_directory: target_directory.as_ref().to_path_buf(),
        }
    }

    /// Removes the target directory, recreates it and writes every file of
    /// `output`. Returns the written paths in file-name order.
    pub fn write(&self, output: &OutputSet) -> Result<Vec<PathBuf>, StorageError> {
        self.clean()?;
        self.ensure_directory()?;

        let mut written = Vec::with_capacity(output.files().len());
        for (file_name, content) in output.files() {
            let path = self.target_directory.join(file_name);
            write_file(&path, content)?;
            debug!(path = %path.display(), "Wrote manifest");
            written.push(path);
        }

        Ok(written)
    }

    fn clean(&self) -> Result<(), StorageError> {
        match std::fs::remove_dir_all(&self.target_directory) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::RemoveDirectory {
                path: self.target_directory.clone(),
                source: e,
            }),
        }
    }

    fn ensure_directory(&self) -> Result<(), StorageError> {
        let mut builder = std::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(DIRECTORY_MODE);
        }

        builder
            .create(&self.target_directory)
            .map_err(|e| StorageError::CreateDirectory {
                path: self.target_directory.clone(),
                source: e,
            })
    }
}

fn write_file(path: &Path, content: &[u8]) -> Result<(), StorageError> {
    use std::io::Write;

    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(path).map_err(|e| StorageError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    file.write_all(content).map_err(|e| StorageError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}
