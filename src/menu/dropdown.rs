//! Dropdown payload built from the config and a version list

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PluginConfig;
use crate::menu::filters::FilterRegistry;
use crate::menu::items::{MenuResolver, ResolvedItem};
use crate::menu::link::LinkContext;
use crate::menu::template::resolve_template;
use crate::version::semver::describe_version;
use crate::version::types::VersionRecord;

/// Root payload rendered as the dropdown.
///
/// Both fields are absent when the menu is disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ResolvedItem>>,
}

impl DropdownData {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.items.is_none()
    }

    /// Shallow merge: fields present in `update` overwrite, the others are kept
    pub fn merge(&mut self, update: DropdownData) {
        if let Some(text) = update.text {
            self.text = Some(text);
        }
        if let Some(items) = update.items {
            self.items = Some(items);
        }
    }
}

/// Builds [`DropdownData`] from a config and versions
#[derive(Debug, Clone)]
pub struct DropdownBuilder {
    filters: FilterRegistry,
    links: LinkContext,
}

impl Default for DropdownBuilder {
    fn default() -> Self {
        Self::new(FilterRegistry::with_builtins(), LinkContext::default())
    }
}

impl DropdownBuilder {
    pub fn new(filters: FilterRegistry, links: LinkContext) -> Self {
        Self { filters, links }
    }

    /// Builder using the config's filters and base path, for a site served from `origin`
    pub fn from_config(config: &PluginConfig, origin: &str) -> Self {
        Self::new(
            FilterRegistry::from_config(&config.filters),
            LinkContext::new(origin, &config.base),
        )
    }

    /// Resolve the dropdown title and items.
    ///
    /// The current version is looked up by name in `versions`; when missing, an
    /// untagged record is synthesized from `config.version`.
    pub fn build(&self, config: &PluginConfig, versions: &[VersionRecord]) -> DropdownData {
        let Some(menu) = &config.menu else {
            return DropdownData::default();
        };

        let current_name = config.version.as_deref().unwrap_or_default();
        let current = versions
            .iter()
            .find(|version| version.name == current_name)
            .cloned()
            .unwrap_or_else(|| {
                debug!("Current version '{}' not in version list", current_name);
                VersionRecord::untagged(current_name)
            });

        let variables = describe_version(&current).variables();
        let text = resolve_template(&menu.text, &variables, &self.filters);
        let items = MenuResolver::new(&self.filters, &self.links)
            .with_default_exclude(config.exclude.as_deref())
            .resolve_items(&menu.items, versions, &current);

        DropdownData {
            text: Some(text),
            items: Some(items),
        }
    }
}
