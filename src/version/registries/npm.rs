//! npm registry API implementation

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{DEFAULT_NPM_URL, USER_AGENT};
use crate::version::error::RegistryError;
use crate::version::registry::{Registry, RegistryKind};
use crate::version::types::PackageVersions;

/// Response from npm registry API (packument)
#[derive(Debug, Deserialize)]
struct NpmPackageResponse {
    #[serde(rename = "dist-tags", default)]
    dist_tags: IndexMap<String, String>,
    versions: IndexMap<String, serde_json::Value>,
}

/// Registry implementation for npm registry API
#[derive(Clone)]
pub struct NpmRegistry {
    client: reqwest::Client,
    base_url: String,
}

impl NpmRegistry {
    /// Creates a new NpmRegistry with a custom base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Encode package name for URL (handles scoped packages)
    fn encode_package_name(package_name: &str) -> String {
        if package_name.starts_with('@') {
            // Scoped package: @scope/name -> @scope%2Fname
            package_name.replace('/', "%2F")
        } else {
            package_name.to_string()
        }
    }
}

impl Default for NpmRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_NPM_URL)
    }
}

#[async_trait::async_trait]
impl Registry for NpmRegistry {
    fn kind(&self) -> RegistryKind {
        RegistryKind::Npm
    }

    async fn fetch_versions(&self, package_name: &str) -> Result<PackageVersions, RegistryError> {
        let encoded_name = Self::encode_package_name(package_name);
        let url = format!("{}/{}", self.base_url, encoded_name);
        debug!("Fetching npm versions from {}", url);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(package_name.to_string()));
        }

        if !status.is_success() {
            warn!("npm registry returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let package_info: NpmPackageResponse = response.json().await.map_err(|e| {
            warn!("Failed to parse npm registry response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        // Keep publish order; sorting is up to the consumer
        let versions: Vec<String> = package_info.versions.into_keys().collect();

        Ok(PackageVersions::with_tags(versions, package_info.dist_tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn fetch_versions_returns_versions_and_dist_tags() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/chart.js")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "name": "chart.js",
                    "dist-tags": { "latest": "3.5.1", "next": "3.6.0-rc.1" },
                    "versions": {
                        "3.5.0": {},
                        "3.5.1": {},
                        "3.6.0-rc.1": {}
                    }
                }"#,
            )
            .create_async()
            .await;

        let registry = NpmRegistry::new(&server.url());
        let result = registry.fetch_versions("chart.js").await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            result.versions,
            vec![
                "3.5.0".to_string(),
                "3.5.1".to_string(),
                "3.6.0-rc.1".to_string()
            ]
        );
        assert_eq!(result.tags.get("latest").map(String::as_str), Some("3.5.1"));
        assert_eq!(
            result.tags.get("next").map(String::as_str),
            Some("3.6.0-rc.1")
        );
    }

    #[tokio::test]
    async fn fetch_versions_returns_not_found_for_nonexistent_package() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/nonexistent-package")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": "Not found"}"#)
            .create_async()
            .await;

        let registry = NpmRegistry::new(&server.url());
        let result = registry.fetch_versions("nonexistent-package").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::NotFound(_))));
    }

    #[tokio::test]
    async fn fetch_versions_handles_scoped_package() {
        let mut server = Server::new_async().await;

        // Scoped packages use URL encoding: @types/node -> @types%2Fnode
        let mock = server
            .mock("GET", "/@types%2Fnode")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "name": "@types/node",
                    "versions": {
                        "18.0.0": {},
                        "20.0.0": {}
                    }
                }"#,
            )
            .create_async()
            .await;

        let registry = NpmRegistry::new(&server.url());
        let result = registry.fetch_versions("@types/node").await.unwrap();

        mock.assert_async().await;
        assert_eq!(
            result.versions,
            vec!["18.0.0".to_string(), "20.0.0".to_string()]
        );
        assert!(result.tags.is_empty());
    }

    #[tokio::test]
    async fn fetch_versions_rejects_response_without_versions() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/broken")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{ "name": "broken" }"#)
            .create_async()
            .await;

        let registry = NpmRegistry::new(&server.url());
        let result = registry.fetch_versions("broken").await;

        mock.assert_async().await;
        assert!(matches!(result, Err(RegistryError::InvalidResponse(_))));
    }
}
