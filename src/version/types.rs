//! Common types for version records

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A version published to the registry, with the tag pointing at it (if any)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionRecord {
    /// Version string, ideally semver (e.g., "1.2.3")
    pub name: String,
    /// Registry alias targeting this version (e.g., "latest")
    #[serde(default)]
    pub tag: Option<String>,
}

impl VersionRecord {
    pub fn new(name: impl Into<String>, tag: Option<&str>) -> Self {
        Self {
            name: name.into(),
            tag: tag.map(str::to_string),
        }
    }

    /// Record without tag information, as stored in build-time snapshots
    pub fn untagged(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }

    pub fn without_tag(self) -> Self {
        Self {
            name: self.name,
            tag: None,
        }
    }
}

/// Raw registry listing for a package
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageVersions {
    /// Version strings in the order the registry listed them
    pub versions: Vec<String>,
    /// Tag name -> version, in the order the registry listed them
    pub tags: IndexMap<String, String>,
}

impl PackageVersions {
    pub fn new(versions: Vec<String>) -> Self {
        Self {
            versions,
            tags: IndexMap::new(),
        }
    }

    pub fn with_tags(versions: Vec<String>, tags: IndexMap<String, String>) -> Self {
        Self { versions, tags }
    }

    /// Attach to each version the first tag (in registry order) targeting it
    pub fn into_records(self) -> Vec<VersionRecord> {
        let tags = self.tags;
        self.versions
            .into_iter()
            .map(|name| {
                let tag = tags
                    .iter()
                    .find(|(_, target)| **target == name)
                    .map(|(tag, _)| tag.clone());
                VersionRecord { name, tag }
            })
            .collect()
    }
}
