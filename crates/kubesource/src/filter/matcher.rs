use crate::config::schema::{Filter, Selector};
use crate::manifest::Identity;

impl Selector {
    /// Returns true if every constraint set on the selector holds for
    /// `identity`. Unset fields match anything.
    pub fn matches(&self, identity: &Identity) -> bool {
        if !self.kind.is_empty() && self.kind != identity.kind {
            return false;
        }

        if !self.api_version.is_empty() && self.api_version != identity.api_version {
            return false;
        }

        let Some(metadata) = &self.metadata else {
            return true;
        };

        if !metadata.name.is_empty() && metadata.name != identity.name {
            return false;
        }

        if !metadata.namespace.is_empty() && metadata.namespace != identity.namespace {
            return false;
        }

        metadata
            .labels
            .iter()
            .all(|(key, value)| identity.labels.get(key) == Some(value))
    }
}

impl Filter {
    /// Include/exclude decision for one identity. Exclude wins over include.
    pub fn includes(&self, identity: &Identity) -> bool {
        let included =
            self.include.is_empty() || self.include.iter().any(|s| s.matches(identity));
        if !included {
            return false;
        }

        !self.exclude.iter().any(|s| s.matches(identity))
    }
}

/// Returns true if `identity` passes `filter`; no filter includes everything.
pub fn included(identity: &Identity, filter: Option<&Filter>) -> bool {
    filter.map_or(true, |f| f.includes(identity))
}
