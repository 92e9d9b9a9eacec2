//! Order-preserving manifest documents.

use serde_yaml::{Mapping, Value};

use super::identity::Identity;

/// A top-level manifest mapping.
///
/// Backed by [`serde_yaml::Mapping`], which keeps keys in insertion order, so
/// a parsed document re-serializes with its original key order. Nested values
/// are plain [`serde_yaml::Value`]s.
#[derive(Debug, Clone, PartialEq)]
pub struct Document(Mapping);

impl Document {
    pub fn new(mapping: Mapping) -> Self {
        Self(mapping)
    }

    /// Returns the value stored under a string key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a top-level string field, or `""` when absent or not a string.
    pub fn get_str(&self, key: &str) -> &str {
        self.get(key).and_then(Value::as_str).unwrap_or("")
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.0.keys()
    }

    /// Serializes the document back to YAML in its original key order.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&self.0)
    }
}

/// A rendered manifest together with its extracted identity.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    pub identity: Identity,
    pub document: Document,
}

impl ParsedDocument {
    pub fn new(document: Document) -> Self {
        Self {
            identity: Identity::from_document(&document),
            document,
        }
    }
}
