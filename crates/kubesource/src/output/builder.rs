use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::config::schema::Filter;
use crate::error::ManifestError;
use crate::filter::included;
use crate::manifest::{Identity, ParsedDocument};

use super::kustomization::{generate_index, INDEX_FILE_NAME};

/// The complete file set of one target: relative file name to content.
#[derive(Debug, Clone, Default)]
pub struct OutputSet {
    files: BTreeMap<String, Vec<u8>>,
    collisions: Vec<String>,
}

impl OutputSet {
    pub fn files(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.files
    }

    pub fn get(&self, file_name: &str) -> Option<&[u8]> {
        self.files.get(file_name).map(Vec::as_slice)
    }

    /// Number of manifest files, excluding the index file.
    pub fn manifest_count(&self) -> usize {
        self.files
            .keys()
            .filter(|name| name.as_str() != INDEX_FILE_NAME)
            .count()
    }

    /// File names that more than one document mapped to. The last document
    /// in stream order is the one kept.
    pub fn collisions(&self) -> &[String] {
        &self.collisions
    }
}

/// Generates the file name for a manifest:
/// `{kind}--{name}.yaml`, or `{kind}--{namespace}--{name}.yaml` when namespaced.
pub fn generate_filename(identity: &Identity) -> String {
    if identity.namespace.is_empty() {
        format!("{}--{}.yaml", identity.kind, identity.name)
    } else {
        format!(
            "{}--{}--{}.yaml",
            identity.kind, identity.namespace, identity.name
        )
    }
}

/// Filters `documents` for one target and renders the resulting file set,
/// including the `kustomization.yaml` index.
pub fn build_output_set(
    documents: &[ParsedDocument],
    filter: Option<&Filter>,
) -> Result<OutputSet, ManifestError> {
    let mut output = OutputSet::default();

    for parsed in documents {
        let file_name = generate_filename(&parsed.identity);

        if !included(&parsed.identity, filter) {
            debug!(file = %file_name, "Excluded by filter");
            continue;
        }

        let content = parsed
            .document
            .to_yaml()
            .map_err(|e| ManifestError::Serialize {
                file: file_name.clone(),
                source: e,
            })?;

        if output.files.insert(file_name.clone(), content.into_bytes()).is_some() {
            warn!(file = %file_name, "Multiple documents map to the same file, keeping the last one");
            if !output.collisions.contains(&file_name) {
                output.collisions.push(file_name);
            }
        } else {
            debug!(file = %file_name, "Included");
        }
    }

    let index = generate_index(output.files.keys().map(String::as_str))?;
    output.files.insert(INDEX_FILE_NAME.to_string(), index);

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{MetadataSelector, Selector};
    use crate::manifest::parse_documents;

    fn parse(input: &str) -> Vec<ParsedDocument> {
        parse_documents(input.as_bytes(), "test").unwrap()
    }

    fn index_resources(output: &OutputSet) -> Vec<String> {
        let value: serde_yaml::Value =
            serde_yaml::from_slice(output.get(INDEX_FILE_NAME).unwrap()).unwrap();
        serde_yaml::from_value(value["resources"].clone()).unwrap()
    }

    #[test]
    fn test_generate_filename() {
        let mut identity = Identity {
            kind: "Service".to_string(),
            name: "web".to_string(),
            ..Identity::default()
        };
        assert_eq!(generate_filename(&identity), "Service--web.yaml");

        identity.namespace = "prod".to_string();
        assert_eq!(generate_filename(&identity), "Service--prod--web.yaml");
    }

    #[test]
    fn test_include_by_kind() {
        let documents =
            parse("kind: ConfigMap\nmetadata:\n  name: a\n---\nkind: Secret\nmetadata:\n  name: b\n");
        let filter = Filter {
            include: vec![Selector::kind("ConfigMap")],
            exclude: vec![],
        };

        let output = build_output_set(&documents, Some(&filter)).unwrap();

        let names: Vec<_> = output.files().keys().cloned().collect();
        assert_eq!(names, vec!["ConfigMap--a.yaml", "kustomization.yaml"]);
        assert_eq!(
            output.get("ConfigMap--a.yaml").unwrap(),
            b"kind: ConfigMap\nmetadata:\n  name: a\n"
        );
        assert_eq!(index_resources(&output), vec!["ConfigMap--a.yaml"]);
        assert_eq!(output.manifest_count(), 1);
    }

    #[test]
    fn test_exclude_namespace() {
        let documents = parse(
            "kind: Deployment\nmetadata:\n  name: dns\n  namespace: kube-system\n---\nkind: Deployment\nmetadata:\n  name: web\n",
        );
        let filter = Filter {
            include: vec![Selector::default()],
            exclude: vec![
                Selector::default().with_metadata(MetadataSelector::namespace("kube-system"))
            ],
        };

        let output = build_output_set(&documents, Some(&filter)).unwrap();

        assert_eq!(index_resources(&output), vec!["Deployment--web.yaml"]);
        assert!(output.get("Deployment--kube-system--dns.yaml").is_none());
    }

    #[test]
    fn test_same_name_in_different_namespaces() {
        let documents = parse(
            "kind: Role\nmetadata:\n  name: reader\n  namespace: a\n---\nkind: Role\nmetadata:\n  name: reader\n  namespace: b\n",
        );

        let output = build_output_set(&documents, None).unwrap();

        assert_eq!(
            index_resources(&output),
            vec!["Role--a--reader.yaml", "Role--b--reader.yaml"]
        );
        assert!(output.collisions().is_empty());
    }

    #[test]
    fn test_collision_keeps_last_and_is_reported() {
        let documents = parse(
            "kind: ConfigMap\nmetadata:\n  name: cfg\ndata:\n  v: first\n---\nkind: ConfigMap\nmetadata:\n  name: cfg\ndata:\n  v: second\n",
        );

        let output = build_output_set(&documents, None).unwrap();

        assert_eq!(output.collisions(), ["ConfigMap--cfg.yaml".to_string()]);
        let content = String::from_utf8(output.get("ConfigMap--cfg.yaml").unwrap().to_vec()).unwrap();
        assert!(content.contains("second"));
        assert_eq!(output.manifest_count(), 1);
    }

    #[test]
    fn test_nothing_included_still_writes_index() {
        let documents = parse("kind: Secret\nmetadata:\n  name: b\n");
        let filter = Filter {
            include: vec![Selector::kind("ConfigMap")],
            exclude: vec![],
        };

        let output = build_output_set(&documents, Some(&filter)).unwrap();

        assert_eq!(output.files().len(), 1);
        assert!(index_resources(&output).is_empty());
    }

    #[test]
    fn test_output_preserves_key_order() {
        let documents = parse("spec:\n  z: 1\n  a: 2\nkind: Thing\nmetadata:\n  name: t\n");
        let output = build_output_set(&documents, None).unwrap();
        assert_eq!(
            output.get("Thing--t.yaml").unwrap(),
            b"spec:\n  z: 1\n  a: 2\nkind: Thing\nmetadata:\n  name: t\n"
        );
    }
}
