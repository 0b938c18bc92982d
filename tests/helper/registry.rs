//! Registry test utilities

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::oneshot;

use version_menu::version::error::RegistryError;
use version_menu::version::registry::{Registry, RegistryKind};
use version_menu::version::types::PackageVersions;

/// In-memory registry
pub struct MockRegistry {
    kind: RegistryKind,
    packages: HashMap<String, PackageVersions>,
    calls: AtomicUsize,
}

impl MockRegistry {
    pub fn new(kind: RegistryKind) -> Self {
        Self {
            kind,
            packages: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_versions(mut self, package: &str, versions: Vec<&str>) -> Self {
        self.packages.insert(
            package.to_string(),
            PackageVersions::new(versions.into_iter().map(|v| v.to_string()).collect()),
        );
        self
    }

    pub fn with_tag(mut self, package: &str, tag: &str, version: &str) -> Self {
        if let Some(entry) = self.packages.get_mut(package) {
            entry.tags.insert(tag.to_string(), version.to_string());
        }
        self
    }

    /// Number of fetches served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Registry for MockRegistry {
    fn kind(&self) -> RegistryKind {
        self.kind
    }

    async fn fetch_versions(&self, package_name: &str) -> Result<PackageVersions, RegistryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.packages
            .get(package_name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(package_name.to_string()))
    }
}

/// Registry whose response is held until the paired sender fires
pub struct GatedRegistry {
    gate: Mutex<Option<oneshot::Receiver<()>>>,
    versions: Vec<String>,
}

impl GatedRegistry {
    pub fn new(versions: Vec<&str>) -> (Self, oneshot::Sender<()>) {
        let (tx, rx) = oneshot::channel();
        let registry = Self {
            gate: Mutex::new(Some(rx)),
            versions: versions.into_iter().map(|v| v.to_string()).collect(),
        };
        (registry, tx)
    }
}

#[async_trait]
impl Registry for GatedRegistry {
    fn kind(&self) -> RegistryKind {
        RegistryKind::JsDelivr
    }

    async fn fetch_versions(&self, _package_name: &str) -> Result<PackageVersions, RegistryError> {
        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.await
                .map_err(|_| RegistryError::InvalidResponse("gate dropped".to_string()))?;
        }
        Ok(PackageVersions::with_tags(
            self.versions.clone(),
            IndexMap::new(),
        ))
    }
}
