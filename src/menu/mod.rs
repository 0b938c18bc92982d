//! Menu resolution
//!
//! ```text
//! MenuConfig + [VersionRecord]
//!        │
//!        ▼
//! DropdownBuilder ── current version ──► template (title)
//!        │
//!        ▼
//! MenuResolver ── "versions" ──► exclude ► collapse ► limit ► template/link
//!              ── groups ──────► recurse
//!              ── leaves ──────► template/link
//!        │
//!        ▼
//! DropdownData { text, items }
//! ```

pub mod dropdown;
pub mod filters;
pub mod items;
pub mod link;
pub mod template;

pub use dropdown::{DropdownBuilder, DropdownData};
pub use filters::{Filter, FilterRegistry, TemplateFilter};
pub use items::{LeafItem, LinksItem, MenuItem, MenuResolver, ResolvedItem, VersionsItem};
pub use link::LinkContext;
