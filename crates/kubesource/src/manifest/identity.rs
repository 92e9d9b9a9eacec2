//! Identity extraction for rendered manifests.

use std::collections::HashMap;

use serde_yaml::Value;

use super::document::Document;

/// Normalized identity of a manifest, used for filtering and file naming.
///
/// Missing fields are represented as empty strings and an empty label map;
/// there is no separate "absent" state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub kind: String,
    pub api_version: String,
    pub name: String,
    pub namespace: String,
    pub labels: HashMap<String, String>,
}

impl Identity {
    /// Extracts the identity from a document, tolerating missing or
    /// mistyped fields.
    pub fn from_document(document: &Document) -> Self {
        let metadata = document.get("metadata");

        Self {
            kind: document.get_str("kind").to_string(),
            api_version: document.get_str("apiVersion").to_string(),
            name: nested_str(metadata, "name").to_string(),
            namespace: nested_str(metadata, "namespace").to_string(),
            labels: nested_labels(metadata),
        }
    }
}

fn nested_str<'a>(parent: Option<&'a Value>, key: &str) -> &'a str {
    parent
        .and_then(|value| value.get(key))
        .and_then(Value::as_str)
        .unwrap_or("")
}

fn nested_labels(metadata: Option<&Value>) -> HashMap<String, String> {
    let Some(Value::Mapping(labels)) = metadata.and_then(|m| m.get("labels")) else {
        return HashMap::new();
    };

    labels
        .iter()
        .filter_map(|(key, value)| Some((key.as_str()?.to_string(), value.as_str()?.to_string())))
        .collect()
}
