use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the per-directory configuration file.
pub const CONFIG_FILE_NAME: &str = "kubesource.yaml";

/// The `kubesource.yaml` configuration of one directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// One upstream build root and the targets it renders into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(default)]
    pub source_dir: String,
    #[serde(default)]
    pub targets: Vec<Target>,
}

/// A directory where rendered manifests should be saved.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Target {
    #[serde(default)]
    pub directory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

/// Filtering options for a target.
///
/// An empty include list means to include everything.
/// An empty exclude list means to exclude nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<Selector>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<Selector>,
}

/// A resource selector. All non-empty fields must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selector {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataSelector>,
}

impl Selector {
    pub fn kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    pub fn with_metadata(mut self, metadata: MetadataSelector) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata-based selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSelector {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
}

impl MetadataSelector {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }
}

/// Raw on-disk shape. Accepts both the `sources` list and the single-source
/// form with `sourceDir`/`targets` at the document root.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawConfig {
    #[serde(default)]
    pub api_version: String,
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub source_dir: Option<String>,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl RawConfig {
    pub(crate) fn into_config(self) -> Config {
        let mut sources = self.sources;
        if self.source_dir.is_some() || !self.targets.is_empty() {
            sources.insert(
                0,
                Source {
                    source_dir: self.source_dir.unwrap_or_default(),
                    targets: self.targets,
                },
            );
        }

        Config {
            api_version: self.api_version,
            kind: self.kind,
            sources,
        }
    }
}
