pub mod options;
pub mod runner;
pub mod summary;

pub use options::{FailurePolicy, PipelineOptions};
pub use runner::Pipeline;
pub use summary::{RunSummary, TargetReport};
