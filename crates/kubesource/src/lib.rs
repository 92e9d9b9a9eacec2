pub mod config;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod storage;

pub use config::{load_config, Config, Filter, MetadataSelector, Selector, Source, Target};
pub use discovery::find_directories;
pub use error::{
    ConfigError, DiscoveryError, KubesourceError, ManifestError, RenderError, Result, StorageError,
};
pub use manifest::{parse_documents, Document, Identity, ParsedDocument};
pub use output::{build_output_set, OutputSet};
pub use pipeline::{FailurePolicy, Pipeline, PipelineOptions, RunSummary};
pub use render::{CommandExecutor, Kustomize, SystemExecutor};
pub use storage::TargetWriter;
