use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KubesourceError {
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("processing directory '{path}': {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: Box<KubesourceError>,
    },

    #[error("processing source '{path}': {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: Box<KubesourceError>,
    },

    #[error("processing target '{path}': {source}")]
    Target {
        path: PathBuf,
        #[source]
        source: Box<KubesourceError>,
    },

    #[error("Run cancelled")]
    Cancelled,
}

impl KubesourceError {
    pub fn in_directory(self, path: impl Into<PathBuf>) -> Self {
        Self::Directory {
            path: path.into(),
            source: Box::new(self),
        }
    }

    pub fn in_source(self, path: impl Into<PathBuf>) -> Self {
        Self::Source {
            path: path.into(),
            source: Box::new(self),
        }
    }

    pub fn in_target(self, path: impl Into<PathBuf>) -> Self {
        Self::Target {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// Returns true if the run was stopped by a cancellation request,
    /// looking through any context wrappers.
    pub fn is_cancelled(&self) -> bool {
        match self {
            Self::Cancelled => true,
            Self::Directory { source, .. }
            | Self::Source { source, .. }
            | Self::Target { source, .. } => source.is_cancelled(),
            _ => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Failed to walk directory '{path}': {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config YAML '{path}': {source}")]
    ParseYaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Config validation failed for '{path}': {message}")]
    Validation { path: PathBuf, message: String },
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("{file} not found in source directory: {directory}")]
    DescriptorMissing { file: String, directory: PathBuf },

    #[error("Failed to check for {file} in '{directory}': {source}")]
    DescriptorCheck {
        file: String,
        directory: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary} not found in PATH. Please install {binary}")]
    BinaryNotFound { binary: String },

    #[error("Failed to resolve absolute path for '{path}': {source}")]
    AbsolutePath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to run {binary} for '{directory}': {source}")]
    Spawn {
        binary: String,
        directory: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{binary} build failed for '{directory}' ({status})\nStderr: {stderr}")]
    Failed {
        binary: String,
        directory: PathBuf,
        status: String,
        stderr: String,
    },
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to decode YAML document from '{stream}': {source}")]
    Decode {
        stream: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to serialize '{file}': {source}")]
    Serialize {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to clean target directory '{path}': {source}")]
    RemoveDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, KubesourceError>;
