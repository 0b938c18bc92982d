//! jsDelivr package API implementation
//!
//! The npm registry doesn't allow CORS requests, so pages resolve their
//! versions through jsDelivr instead.
//! https://github.com/jsdelivr/data.jsdelivr.com#list-package-versions

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{DEFAULT_JSDELIVR_URL, USER_AGENT};
use crate::version::error::RegistryError;
use crate::version::registry::{Registry, RegistryKind};
use crate::version::types::PackageVersions;

/// Response from jsDelivr `/v1/package/npm/{name}`
#[derive(Debug, Deserialize)]
struct JsDelivrPackageResponse {
    #[serde(default)]
    tags: IndexMap<String, String>,
    versions: Vec<JsDelivrVersion>,
}

/// Versions are plain strings, or objects in the newer `/v1/packages` listing
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsDelivrVersion {
    Plain(String),
    Detailed { version: String },
}

impl JsDelivrVersion {
    fn into_name(self) -> String {
        match self {
            JsDelivrVersion::Plain(version) | JsDelivrVersion::Detailed { version } => version,
        }
    }
}

/// Registry implementation for the jsDelivr data API
#[derive(Clone)]
pub struct JsDelivrRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl JsDelivrRegistry {
    /// Creates a new JsDelivrRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for JsDelivrRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_JSDELIVR_URL)
    }
}

#[async_trait::async_trait]
impl Registry for JsDelivrRegistry {
    fn kind(&self) -> RegistryKind {
        RegistryKind::JsDelivr
    }

    async fn fetch_versions(&self, package_name: &str) -> Result<PackageVersions, RegistryError> {
        let url = format!("{}/v1/package/npm/{}", self.base_url, package_name);
        debug!("Fetching jsDelivr versions from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("jsDelivr returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let package: JsDelivrPackageResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse jsDelivr response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        let versions = package
            .versions
            .into_iter()
            .map(JsDelivrVersion::into_name)
            .collect();

        Ok(PackageVersions::with_tags(versions, package.tags))
    }
}
