use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::menu::items::MenuItem;
use crate::version::registry::RegistryKind;
use crate::version::types::VersionRecord;

// =============================================================================
// Registry constants
// =============================================================================

/// Default base URL for the jsDelivr data API
pub const DEFAULT_JSDELIVR_URL: &str = "https://data.jsdelivr.com";

/// Default base URL for npm registry
pub const DEFAULT_NPM_URL: &str = "https://registry.npmjs.org";

/// User agent sent with registry requests
pub const USER_AGENT: &str = "version-menu";

/// Where dropdowns are inserted when the menu doesn't say otherwise
pub const DEFAULT_LOCATIONS: &[&str] = &[
    ".navbar > .home-link::after",
    ".sidebar > .nav-links > :first-child::before",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config '{path}': {source}")]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(
        "Failed to read '{path}': please provide a valid path to your project package.json \
         file by setting the 'package' option. This path must be relative to the config file."
    )]
    ReadPackage { path: PathBuf },

    #[error(
        "Missing '{field}': set it in the config or in the project package.json ('{path}')"
    )]
    MissingPackageField { field: &'static str, path: PathBuf },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExclude {
        pattern: String,
        source: regex::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteAsset {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Plugin configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PluginConfig {
    /// Path to the project package.json, relative to the config file
    pub package: PathBuf,
    /// Package name on the registry (defaults to package.json `name`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Version of these docs (defaults to package.json `version`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Base path the docs site is served from
    pub base: String,
    /// `None` disables the dropdown
    pub menu: Option<MenuConfig>,
    /// Exclude pattern for "versions" items that don't set their own
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
    /// Filter name -> template evaluated with `{{value}}` and the version variables
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub filters: IndexMap<String, String>,
    pub registry: RegistryConfig,
    /// Versions embedded at build time
    pub versions: Vec<VersionRecord>,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            package: PathBuf::from("package.json"),
            name: None,
            version: None,
            base: "/".to_string(),
            menu: Some(MenuConfig::default()),
            exclude: None,
            filters: IndexMap::new(),
            registry: RegistryConfig::default(),
            versions: Vec::new(),
        }
    }
}

/// Dropdown menu configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct MenuConfig {
    /// Dropdown title template
    pub text: String,
    /// Insertion points, `selector[::before|::after]`
    pub locations: Vec<String>,
    pub items: Vec<MenuItem>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            text: "{{version}}".to_string(),
            locations: DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect(),
            items: vec![MenuItem::versions_with_target("_self")],
        }
    }
}

/// Registry backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RegistryConfig {
    pub kind: RegistryKind,
    /// Overrides the backend's default base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Fields read from the project package.json
#[derive(Debug, Deserialize)]
struct PackageManifest {
    name: Option<String>,
    version: Option<String>,
}

impl PluginConfig {
    /// Load the config file and complete it from the project package.json.
    ///
    /// Explicit `name`/`version` in the config win over package.json.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading config from {:?}", path);

        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: PluginConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::ParseConfig {
                path: path.to_path_buf(),
                source,
            })?;

        let root = path.parent().unwrap_or_else(|| Path::new("."));
        config.apply_package(root)?;
        config.base = normalize_base(&config.base);
        config.validate()?;

        Ok(config)
    }

    fn apply_package(&mut self, root: &Path) -> Result<(), ConfigError> {
        let package_path = root.join(&self.package);
        debug!("Reading package manifest {:?}", package_path);

        // https://docs.npmjs.com/cli/v7/configuring-npm/package-json
        let manifest: PackageManifest = fs::read_to_string(&package_path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .ok_or_else(|| ConfigError::ReadPackage {
                path: package_path.clone(),
            })?;

        if self.name.is_none() {
            self.name = manifest.name;
        }
        if self.version.is_none() {
            self.version = manifest.version;
        }

        if self.name.is_none() {
            return Err(ConfigError::MissingPackageField {
                field: "name",
                path: package_path,
            });
        }
        if self.version.is_none() {
            return Err(ConfigError::MissingPackageField {
                field: "version",
                path: package_path,
            });
        }

        Ok(())
    }

    /// Check that every exclude pattern compiles
    pub fn validate(&self) -> Result<(), ConfigError> {
        let item_patterns = self
            .menu
            .iter()
            .flat_map(|menu| menu.items.iter())
            .flat_map(MenuItem::exclude_patterns);

        for pattern in self.exclude.iter().map(String::as_str).chain(item_patterns) {
            Regex::new(pattern).map_err(|source| ConfigError::InvalidExclude {
                pattern: pattern.to_string(),
                source,
            })?;
        }

        Ok(())
    }
}

/// Ensure the base path starts and ends with '/'
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Returns the path to the data directory for version-menu.
/// Uses $XDG_DATA_HOME/version-menu if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/version-menu,
/// or ./version-menu if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("version-menu.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("version-menu")
}
