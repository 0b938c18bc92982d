//! Documentation versions dropdown resolution
//!
//! Resolves a navigable list of versions from a package registry and a
//! declarative menu configuration into renderable link/text items.
//!
//! - [`version`]: semver descriptors, collapsing, registry backends
//! - [`menu`]: template resolution, filters, menu items, dropdown data
//! - [`sync`]: seeded/synced state lifecycle and build-time snapshots
//! - [`dom`]: in-memory document used as the injection target

pub mod config;
pub mod dom;
pub mod logging;
pub mod menu;
pub mod sync;
pub mod version;
