//! External manifest rendering.

pub mod executor;
pub mod kustomize;

pub use executor::{CommandExecutor, SystemExecutor};
pub use kustomize::{verify_descriptor, Kustomize, DEFAULT_KUSTOMIZE_BINARY, DESCRIPTOR_FILE_NAMES};
