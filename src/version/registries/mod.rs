//! Registry implementations for fetching package versions

pub mod jsdelivr;
pub mod npm;

use std::sync::Arc;

pub use jsdelivr::JsDelivrRegistry;
pub use npm::NpmRegistry;

use crate::config::RegistryConfig;
use crate::version::registry::{Registry, RegistryKind};

/// Create the registry backend selected by the configuration
pub fn create_registry(config: &RegistryConfig) -> Arc<dyn Registry> {
    match (config.kind, config.url.as_deref()) {
        (RegistryKind::JsDelivr, Some(url)) => Arc::new(JsDelivrRegistry::new(url)),
        (RegistryKind::JsDelivr, None) => Arc::new(JsDelivrRegistry::default()),
        (RegistryKind::Npm, Some(url)) => Arc::new(NpmRegistry::new(url)),
        (RegistryKind::Npm, None) => Arc::new(NpmRegistry::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(RegistryKind::JsDelivr, None)]
    #[case(RegistryKind::JsDelivr, Some("http://localhost:1234"))]
    #[case(RegistryKind::Npm, None)]
    #[case(RegistryKind::Npm, Some("http://localhost:1234"))]
    fn create_registry_returns_configured_kind(
        #[case] kind: RegistryKind,
        #[case] url: Option<&str>,
    ) {
        let registry = create_registry(&RegistryConfig {
            kind,
            url: url.map(str::to_string),
        });

        assert_eq!(registry.kind(), kind);
    }
}
