//! Version layer: parsing, collapsing and fetching package versions
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Registry   │────▶│  Records    │────▶│  Collapse   │
//! │  (fetch)    │     │ (name, tag) │     │ (sort/group)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │ Registries  │     │   Semver    │
//! │(jsdelivr,npm│     │(descriptors)│
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`collapse`]: Numeric-aware sorting and per-group deduplication
//! - [`error`]: Error types for registry operations
//! - [`registry`]: Registry trait for fetching versions from remote sources
//! - [`registries`]: Concrete registry implementations (jsDelivr, npm)
//! - [`semver`]: Version descriptors used as template variables
//! - [`types`]: Common types like `VersionRecord` and `PackageVersions`

pub mod collapse;
pub mod error;
pub mod registries;
pub mod registry;
pub mod semver;
pub mod types;
