//! Build-time version snapshot embedded in the site assets

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ConfigError, PluginConfig};
use crate::version::error::RegistryError;
use crate::version::registry::Registry;
use crate::version::types::VersionRecord;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to prefetch versions of '{package}': {source}")]
    Prefetch {
        package: String,
        source: RegistryError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read asset '{path}': {source}")]
    ReadAsset {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid asset: {0}")]
    InvalidAsset(#[from] serde_json::Error),
}

/// Config shipped with the site, versions included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildAsset {
    pub config: PluginConfig,
    pub generated_at: DateTime<Utc>,
}

/// Fetch the package versions for embedding.
///
/// Tags are dropped: they move on every publish and would be stale in the
/// built site.
pub async fn prefetch(
    registry: &dyn Registry,
    config: &PluginConfig,
) -> Result<Vec<VersionRecord>, SnapshotError> {
    let package = config.name.clone().unwrap_or_default();
    info!(
        "Prefetching versions of {} from {}",
        package,
        registry.kind().as_str()
    );

    let versions = registry
        .fetch_versions(&package)
        .await
        .map_err(|source| SnapshotError::Prefetch {
            package: package.clone(),
            source,
        })?;

    let records: Vec<VersionRecord> = versions
        .into_records()
        .into_iter()
        .map(VersionRecord::without_tag)
        .collect();
    debug!("Prefetched {} versions of {}", records.len(), package);

    Ok(records)
}

/// Prefetch the versions and embed them in a copy of `config`
pub async fn build_asset(
    registry: &dyn Registry,
    config: &PluginConfig,
) -> Result<BuildAsset, SnapshotError> {
    let versions = prefetch(registry, config).await?;
    Ok(BuildAsset {
        config: PluginConfig {
            versions,
            ..config.clone()
        },
        generated_at: Utc::now(),
    })
}

pub fn write_asset(path: &Path, asset: &BuildAsset) -> Result<(), SnapshotError> {
    let content = serde_json::to_string_pretty(asset)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| ConfigError::WriteAsset {
            path: path.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, content).map_err(|source| ConfigError::WriteAsset {
        path: path.to_path_buf(),
        source,
    })?;

    info!(
        "Wrote {} versions to {:?}",
        asset.config.versions.len(),
        path
    );
    Ok(())
}

pub fn read_asset(path: &Path) -> Result<BuildAsset, SnapshotError> {
    let content = fs::read_to_string(path).map_err(|source| SnapshotError::ReadAsset {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}
