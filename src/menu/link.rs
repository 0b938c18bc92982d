//! Link normalization relative to the site base path
//!
//! The router marks an item as current by comparing its path with the current
//! location, relative to `base`. Since `base` already points at one docs version
//! (e.g. `/3.5.1/`), root-relative links must first be resolved against the
//! origin, then expressed as router paths when they fall under `base`.
//! https://github.com/chartjs/Chart.js/issues/8880

use crate::config::normalize_base;
use crate::menu::filters::FilterRegistry;
use crate::menu::template::resolve_template;
use crate::version::semver::Variables;

/// Where the docs are served from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkContext {
    /// Scheme and host, without trailing slash (empty when unknown)
    origin: String,
    /// Base path, starting and ending with '/'
    base: String,
}

impl LinkContext {
    pub fn new(origin: &str, base: &str) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
            base: normalize_base(base),
        }
    }

    /// Context used when the serving origin isn't known (build time)
    pub fn without_origin(base: &str) -> Self {
        Self::new("", base)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Express a resolved link the way the router expects it.
    ///
    /// - `/path` becomes `{origin}/path`
    /// - links under `{origin}{base}` become router paths (`/` + remainder)
    /// - anything else is returned unchanged
    pub fn relativize(&self, link: &str) -> String {
        let absolute = if link.starts_with('/') {
            format!("{}{}", self.origin, link)
        } else {
            link.to_string()
        };

        let prefix = format!("{}{}", self.origin, self.base);
        match absolute.strip_prefix(&prefix) {
            Some(rest) => format!("/{}", rest),
            None => absolute,
        }
    }
}

impl Default for LinkContext {
    fn default() -> Self {
        Self::without_origin("/")
    }
}

/// Resolve a link template and normalize the result against the site base
pub fn resolve_link(
    template: &str,
    variables: &Variables,
    filters: &FilterRegistry,
    context: &LinkContext,
) -> String {
    let link = resolve_template(template, variables, filters);
    if link.is_empty() {
        return link;
    }
    context.relativize(&link)
}
