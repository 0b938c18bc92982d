//! Menu item descriptors and their resolution into renderable items

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::menu::filters::FilterRegistry;
use crate::menu::link::{LinkContext, resolve_link};
use crate::menu::template::resolve_template;
use crate::version::collapse::{VersionGroup, collapse_versions};
use crate::version::semver::describe_version;
use crate::version::types::VersionRecord;

const DEFAULT_VERSIONS_GROUP: &str = "minor";
const DEFAULT_VERSIONS_LINK: &str = "/{{version}}/";
const DEFAULT_VERSIONS_TEXT: &str = "{{version}}";

/// A node of the declared menu tree.
///
/// In the config the `type` field discriminates: `"versions"` expands into one
/// item per collapsed version, any other value (or none) is a group when it has
/// `items` and a leaf otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawMenuItem", into = "RawMenuItem")]
pub enum MenuItem {
    Versions(VersionsItem),
    Links(LinksItem),
    Leaf(LeafItem),
}

/// Placeholder expanded into the available versions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionsItem {
    /// "major", "minor" or "patch"; anything else disables grouping
    pub group: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
    /// Versions whose name matches this pattern are left out
    pub exclude: Option<String>,
    /// Maximum number of items, ignored unless positive; fractions are truncated
    pub limit: Option<f64>,
    pub target: Option<String>,
}

/// Group of nested items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinksItem {
    pub text: Option<String>,
    pub target: Option<String>,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeafItem {
    pub text: Option<String>,
    pub link: Option<String>,
    pub target: Option<String>,
}

/// Wire shape of a menu item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RawMenuItem {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Vec<MenuItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exclude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    limit: Option<f64>,
}

impl From<RawMenuItem> for MenuItem {
    fn from(raw: RawMenuItem) -> Self {
        if raw.kind.as_deref() == Some("versions") {
            return MenuItem::Versions(VersionsItem {
                group: raw.group,
                text: raw.text,
                link: raw.link,
                exclude: raw.exclude,
                limit: raw.limit,
                target: raw.target,
            });
        }

        match raw.items {
            Some(items) => MenuItem::Links(LinksItem {
                text: raw.text,
                target: raw.target,
                items,
            }),
            None => MenuItem::Leaf(LeafItem {
                text: raw.text,
                link: raw.link,
                target: raw.target,
            }),
        }
    }
}

impl From<MenuItem> for RawMenuItem {
    fn from(item: MenuItem) -> Self {
        match item {
            MenuItem::Versions(item) => RawMenuItem {
                kind: Some("versions".to_string()),
                text: item.text,
                link: item.link,
                target: item.target,
                group: item.group,
                exclude: item.exclude,
                limit: item.limit,
                items: None,
            },
            MenuItem::Links(item) => RawMenuItem {
                kind: Some("links".to_string()),
                text: item.text,
                target: item.target,
                items: Some(item.items),
                ..Default::default()
            },
            MenuItem::Leaf(item) => RawMenuItem {
                text: item.text,
                link: item.link,
                target: item.target,
                ..Default::default()
            },
        }
    }
}

impl MenuItem {
    /// Default "versions" placeholder opening links in `target`
    pub fn versions_with_target(target: &str) -> Self {
        MenuItem::Versions(VersionsItem {
            target: Some(target.to_string()),
            ..Default::default()
        })
    }

    /// Exclude patterns declared by this item and its descendants
    pub fn exclude_patterns(&self) -> Vec<&str> {
        match self {
            MenuItem::Versions(item) => item.exclude.as_deref().into_iter().collect(),
            MenuItem::Links(item) => item
                .items
                .iter()
                .flat_map(MenuItem::exclude_patterns)
                .collect(),
            MenuItem::Leaf(_) => Vec::new(),
        }
    }
}

/// A renderable item: a link/text leaf or a group with nested items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ResolvedItem>>,
}

impl ResolvedItem {
    pub fn leaf(text: impl Into<String>, link: Option<String>, target: Option<String>) -> Self {
        Self {
            target,
            text: text.into(),
            link,
            items: None,
        }
    }

    pub fn group(text: impl Into<String>, items: Vec<ResolvedItem>, target: Option<String>) -> Self {
        Self {
            target,
            text: text.into(),
            link: None,
            items: Some(items),
        }
    }

    pub fn is_group(&self) -> bool {
        self.items.is_some()
    }
}

/// Resolves menu trees against a list of versions
#[derive(Debug, Clone, Copy)]
pub struct MenuResolver<'a> {
    filters: &'a FilterRegistry,
    links: &'a LinkContext,
    default_exclude: Option<&'a str>,
}

impl<'a> MenuResolver<'a> {
    pub fn new(filters: &'a FilterRegistry, links: &'a LinkContext) -> Self {
        Self {
            filters,
            links,
            default_exclude: None,
        }
    }

    /// Exclude pattern applied to "versions" items that don't set one
    pub fn with_default_exclude(mut self, exclude: Option<&'a str>) -> Self {
        self.default_exclude = exclude;
        self
    }

    /// Resolve `items` in order, splicing "versions" placeholders in place.
    ///
    /// Text and links of groups and leaves are templated against `current`.
    pub fn resolve_items(
        &self,
        items: &[MenuItem],
        versions: &[VersionRecord],
        current: &VersionRecord,
    ) -> Vec<ResolvedItem> {
        let variables = describe_version(current).variables();
        let mut results = Vec::with_capacity(items.len());

        for item in items {
            match item {
                MenuItem::Versions(options) => {
                    results.extend(self.create_items_for_versions(options, versions));
                }
                MenuItem::Links(group) => {
                    let text = resolve_template(
                        group.text.as_deref().unwrap_or_default(),
                        &variables,
                        self.filters,
                    );
                    let children = self.resolve_items(&group.items, versions, current);
                    results.push(ResolvedItem::group(text, children, group.target.clone()));
                }
                MenuItem::Leaf(leaf) => {
                    let text = resolve_template(
                        leaf.text.as_deref().unwrap_or_default(),
                        &variables,
                        self.filters,
                    );
                    let link = leaf
                        .link
                        .as_deref()
                        .map(|link| resolve_link(link, &variables, self.filters, self.links));
                    results.push(ResolvedItem::leaf(text, link, leaf.target.clone()));
                }
            }
        }

        results
    }

    fn create_items_for_versions(
        &self,
        options: &VersionsItem,
        versions: &[VersionRecord],
    ) -> Vec<ResolvedItem> {
        let group_name = options.group.as_deref().unwrap_or(DEFAULT_VERSIONS_GROUP);
        let text = options.text.as_deref().unwrap_or(DEFAULT_VERSIONS_TEXT);
        let link = options.link.as_deref().unwrap_or(DEFAULT_VERSIONS_LINK);

        let kept: Vec<VersionRecord> = match options.exclude.as_deref().or(self.default_exclude) {
            Some(pattern) => match Regex::new(pattern) {
                Ok(re) => versions
                    .iter()
                    .filter(|version| !re.is_match(&version.name))
                    .cloned()
                    .collect(),
                Err(e) => {
                    warn!("Ignoring invalid exclude pattern '{}': {}", pattern, e);
                    versions.to_vec()
                }
            },
            None => versions.to_vec(),
        };

        let group = group_name.parse::<VersionGroup>().ok();
        let mut collapsed = collapse_versions(group, &kept);
        if let Some(limit) = options.limit.filter(|limit| *limit > 0.0) {
            collapsed.truncate(limit.trunc() as usize);
        }

        debug!(
            "Expanded versions item: {} of {} versions (group: {})",
            collapsed.len(),
            versions.len(),
            group_name
        );

        collapsed
            .iter()
            .map(|version| {
                let variables = describe_version(version).variables();
                ResolvedItem::leaf(
                    resolve_template(text, &variables, self.filters),
                    Some(resolve_link(link, &variables, self.filters, self.links)),
                    options.target.clone(),
                )
            })
            .collect()
    }
}
