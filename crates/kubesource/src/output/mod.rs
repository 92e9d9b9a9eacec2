//! Per-target output file set generation.

pub mod builder;
pub mod kustomization;

pub use builder::{build_output_set, generate_filename, OutputSet};
pub use kustomization::{generate_index, INDEX_FILE_NAME};
