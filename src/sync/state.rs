//! Dropdown state lifecycle: seed from the build-time snapshot, then refresh once

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::config::PluginConfig;
use crate::dom::{Location, NodeId, NodeTree, render_dropdown, update_dropdown};
use crate::menu::{DropdownBuilder, DropdownData};
use crate::version::registry::Registry;

/// Where the state is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    /// Nothing built yet
    Uninitialized,
    /// Built from the versions embedded at build time
    Seeded,
    /// Refreshed from the live registry
    Synced,
}

/// Result of a [`VersionSync::refresh`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Live versions were merged into the state
    Synced { versions: usize },
    /// The registry call failed; the seeded data stays
    Failed,
    /// A refresh was already attempted for this instance
    Skipped,
}

/// Owns the dropdown state of one page instance.
///
/// Observers get the current [`DropdownData`] through [`VersionSync::subscribe`].
/// The state only ever moves forward: a failed refresh keeps the seeded data.
pub struct VersionSync {
    config: PluginConfig,
    builder: DropdownBuilder,
    registry: Arc<dyn Registry>,
    state: watch::Sender<DropdownData>,
    /// Tracks which state the inserted dropdowns were last rendered from
    rendered: watch::Receiver<DropdownData>,
    phase: SyncPhase,
    refresh_attempted: bool,
    inserted: bool,
    mounts: Vec<NodeId>,
}

impl VersionSync {
    pub fn new(config: PluginConfig, builder: DropdownBuilder, registry: Arc<dyn Registry>) -> Self {
        let (state, rendered) = watch::channel(DropdownData::default());
        Self {
            config,
            builder,
            registry,
            state,
            rendered,
            phase: SyncPhase::Uninitialized,
            refresh_attempted: false,
            inserted: false,
            mounts: Vec::new(),
        }
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn is_inserted(&self) -> bool {
        self.inserted
    }

    /// Snapshot of the current state
    pub fn data(&self) -> DropdownData {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<DropdownData> {
        self.state.subscribe()
    }

    /// Build the state from the versions embedded in the config.
    ///
    /// Only the first call has an effect.
    pub fn seed(&mut self) {
        if self.phase != SyncPhase::Uninitialized {
            debug!("Dropdown already seeded, skipping");
            return;
        }

        let data = self.builder.build(&self.config, &self.config.versions);
        debug!(
            "Seeded dropdown from {} embedded versions",
            self.config.versions.len()
        );
        self.state.send_replace(data);
        self.phase = SyncPhase::Seeded;
    }

    /// Fetch the live versions and merge the rebuilt data into the state.
    ///
    /// Attempted at most once; failures are logged and leave the seeded data.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        if self.refresh_attempted {
            debug!("Versions already refreshed, skipping");
            return RefreshOutcome::Skipped;
        }
        self.seed();
        self.refresh_attempted = true;

        let package_name = self.config.name.clone().unwrap_or_default();
        let kind = self.registry.kind();

        match self.registry.fetch_versions(&package_name).await {
            Ok(package_versions) => {
                let versions = package_versions.into_records();
                let data = self.builder.build(&self.config, &versions);
                self.state.send_modify(|state| state.merge(data));
                self.phase = SyncPhase::Synced;
                info!(
                    "Synced {} versions of {} from {}",
                    versions.len(),
                    package_name,
                    kind.as_str()
                );
                RefreshOutcome::Synced {
                    versions: versions.len(),
                }
            }
            Err(e) => {
                error!(
                    "Failed to retrieve available versions for {} from {}: {}",
                    package_name,
                    kind.as_str(),
                    e
                );
                RefreshOutcome::Failed
            }
        }
    }

    /// Seed, then refresh
    pub async fn mount(&mut self) -> RefreshOutcome {
        self.seed();
        self.refresh().await
    }

    /// Insert the dropdown at every configured location on the first call;
    /// later calls re-render the inserted dropdowns when the state changed.
    ///
    /// Returns the number of dropdowns in the document.
    pub fn on_updated(&mut self, tree: &mut NodeTree, root: NodeId) -> usize {
        if self.inserted {
            if matches!(self.rendered.has_changed(), Ok(true)) {
                let data = self.rendered.borrow_and_update().clone();
                for el in &self.mounts {
                    update_dropdown(tree, *el, &data);
                }
                debug!("Re-rendered {} versions dropdowns", self.mounts.len());
            }
            return self.mounts.len();
        }
        self.inserted = true;

        let Some(menu) = &self.config.menu else {
            debug!("Dropdown menu disabled, nothing to insert");
            return 0;
        };

        let data = self.rendered.borrow_and_update().clone();
        for location in &menu.locations {
            let resolved = Location::parse(location)
                .and_then(|location| location.resolve(tree, root).map(|target| (location, target)));
            match resolved {
                Ok((location, target)) => {
                    let el = render_dropdown(tree, &data);
                    location.insert(tree, target, el);
                    self.mounts.push(el);
                }
                Err(e) => error!("Failed to insert versions dropdown: {}", e),
            }
        }

        if self.mounts.is_empty() && !menu.locations.is_empty() {
            warn!("Versions dropdown was not inserted at any location");
        }

        self.mounts.len()
    }
}
