use serde::Deserialize;
use serde_yaml::Value;
use tracing::debug;

use crate::error::ManifestError;

use super::document::{Document, ParsedDocument};

/// Parses a single- or multi-document YAML payload.
///
/// Documents that are empty or not mappings are skipped, since Kubernetes
/// manifests are expected to be mappings. The remaining documents keep their
/// stream order. `stream` names the payload in decode errors.
pub fn parse_documents(content: &[u8], stream: &str) -> Result<Vec<ParsedDocument>, ManifestError> {
    let mut documents = Vec::new();

    for (index, deserializer) in serde_yaml::Deserializer::from_slice(content).enumerate() {
        let value = Value::deserialize(deserializer).map_err(|e| ManifestError::Decode {
            stream: stream.to_string(),
            source: e,
        })?;

        match value {
            Value::Mapping(mapping) if !mapping.is_empty() => {
                documents.push(ParsedDocument::new(Document::new(mapping)));
            }
            other => {
                debug!(stream, index, kind = value_kind(&other), "Skipping non-manifest document");
            }
        }
    }

    Ok(documents)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "empty mapping",
        Value::Tagged(_) => "tagged",
    }
}
