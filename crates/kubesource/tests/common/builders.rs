//! Builder patterns for creating test configurations and manifests.

#![allow(dead_code)]

use kubesource::config::{Config, Filter, Selector, Source, Target};

/// Builder for creating `Config` instances.
pub struct ConfigBuilder {
    sources: Vec<Source>,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn source(mut self, source: SourceBuilder) -> Self {
        self.sources.push(source.build());
        self
    }

    pub fn build(self) -> Config {
        Config {
            api_version: "kubesource.io/v1".to_string(),
            kind: "Kubesource".to_string(),
            sources: self.sources,
        }
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for creating `Source` instances.
pub struct SourceBuilder {
    source_dir: String,
    targets: Vec<Target>,
}

impl SourceBuilder {
    pub fn new(source_dir: &str) -> Self {
        Self {
            source_dir: source_dir.to_string(),
            targets: Vec::new(),
        }
    }

    /// Add a target without a filter.
    pub fn target(mut self, directory: &str) -> Self {
        self.targets.push(Target {
            directory: directory.to_string(),
            filter: None,
        });
        self
    }

    /// Add a target with include and exclude selectors.
    pub fn filtered_target(
        mut self,
        directory: &str,
        include: Vec<Selector>,
        exclude: Vec<Selector>,
    ) -> Self {
        self.targets.push(Target {
            directory: directory.to_string(),
            filter: Some(Filter { include, exclude }),
        });
        self
    }

    pub fn build(self) -> Source {
        Source {
            source_dir: self.source_dir,
            targets: self.targets,
        }
    }
}

/// Render a single manifest document.
pub fn manifest(api_version: &str, kind: &str, name: &str, namespace: Option<&str>) -> String {
    let mut doc = format!(
        "apiVersion: {}\nkind: {}\nmetadata:\n  name: {}\n",
        api_version, kind, name
    );
    if let Some(ns) = namespace {
        doc.push_str(&format!("  namespace: {}\n", ns));
    }
    doc
}

/// Join documents into a multi-document stream.
pub fn stream(documents: &[String]) -> String {
    documents.join("---\n")
}
