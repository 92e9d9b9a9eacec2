use serde::Serialize;

use crate::error::ManifestError;

/// File name of the synthesized index file.
pub const INDEX_FILE_NAME: &str = "kustomization.yaml";

const KUSTOMIZATION_API_VERSION: &str = "kustomize.config.k8s.io/v1beta1";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Kustomization<'a> {
    api_version: &'a str,
    kind: &'a str,
    resources: Vec<&'a str>,
}

/// Renders a `kustomization.yaml` listing `manifest_files` in sorted order.
/// The index file itself is never listed.
pub fn generate_index<'a, I>(manifest_files: I) -> Result<Vec<u8>, ManifestError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut resources: Vec<&str> = manifest_files
        .into_iter()
        .filter(|name| *name != INDEX_FILE_NAME)
        .collect();
    resources.sort_unstable();
    resources.dedup();

    let kustomization = Kustomization {
        api_version: KUSTOMIZATION_API_VERSION,
        kind: "Kustomization",
        resources,
    };

    serde_yaml::to_string(&kustomization)
        .map(String::into_bytes)
        .map_err(|e| ManifestError::Serialize {
            file: INDEX_FILE_NAME.to_string(),
            source: e,
        })
}
