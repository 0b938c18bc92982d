//! Registry trait for fetching the versions published for a package

#[cfg(test)]
use mockall::automock;

use serde::{Deserialize, Serialize};

use crate::version::error::RegistryError;
use crate::version::types::PackageVersions;

/// Kind of registry backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryKind {
    /// jsDelivr package API, reachable from browsers (CORS-enabled)
    #[default]
    JsDelivr,
    /// npm registry (registry.npmjs.org)
    Npm,
}

impl RegistryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegistryKind::JsDelivr => "jsdelivr",
            RegistryKind::Npm => "npm",
        }
    }
}

/// Trait for fetching package versions from a registry
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Registry: Send + Sync {
    /// Returns the kind of registry this implementation handles
    fn kind(&self) -> RegistryKind;

    /// Fetches all published versions and tags for a package
    ///
    /// # Arguments
    /// * `package_name` - The name of the package (e.g., "chart.js", "@scope/name")
    ///
    /// # Returns
    /// * `Ok(PackageVersions)` - Versions in registry order, with their tags
    /// * `Err(RegistryError)` - If the registry is unreachable or the response is malformed
    async fn fetch_versions(&self, package_name: &str) -> Result<PackageVersions, RegistryError>;
}
