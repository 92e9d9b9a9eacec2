use crate::render::DEFAULT_KUSTOMIZE_BINARY;

/// What to do with the remaining directories after one fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop at the first failing directory.
    #[default]
    Abort,
    /// Record the failure and move on to the next directory.
    Continue,
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub kustomize_binary: String,
    pub failure_policy: FailurePolicy,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            kustomize_binary: DEFAULT_KUSTOMIZE_BINARY.to_string(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl PipelineOptions {
    pub fn with_kustomize_binary(mut self, binary: impl Into<String>) -> Self {
        self.kustomize_binary = binary.into();
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}
