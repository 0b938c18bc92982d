//! Two-phase dropdown data lifecycle
//!
//! ```text
//! build time:  Registry ──prefetch──► BuildAsset { config + versions }
//!
//! page:        Uninitialized ──seed()──► Seeded ──refresh()──► Synced
//!                                          │          (once)
//!                                          └── fetch failure: stays Seeded
//! ```

pub mod snapshot;
pub mod state;

pub use snapshot::{BuildAsset, SnapshotError, build_asset, prefetch, read_asset, write_asset};
pub use state::{RefreshOutcome, SyncPhase, VersionSync};
