//! Element insertion at `selector[::before|::after]` locations

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::dom::selector::{Selector, SelectorError, query_selector};
use crate::dom::tree::{NodeId, NodeTree};

static LOCATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<selector>.+?)(?:::(?P<position>after|before))?$")
        .expect("location pattern is valid")
});

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InjectError {
    #[error("Invalid location '{0}'")]
    InvalidLocation(String),

    #[error("Invalid query selector '{location}': {source}")]
    InvalidSelector {
        location: String,
        source: SelectorError,
    },

    #[error("Target '{0}' does not match any element")]
    TargetNotFound(String),
}

/// Where the element goes relative to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// Last child of the target
    Append,
    /// Previous sibling of the target
    Before,
    /// Next sibling of the target
    After,
}

/// A parsed insertion point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    raw: String,
    selector: Selector,
    position: Position,
}

impl Location {
    pub fn parse(location: &str) -> Result<Self, InjectError> {
        let raw = location.trim();
        let caps = LOCATION_RE
            .captures(raw)
            .ok_or_else(|| InjectError::InvalidLocation(location.to_string()))?;

        let position = match caps.name("position").map(|m| m.as_str()) {
            Some("before") => Position::Before,
            Some("after") => Position::After,
            _ => Position::Append,
        };

        let selector = caps
            .name("selector")
            .map(|m| m.as_str().trim())
            .unwrap_or_default();
        let selector = Selector::parse(selector).map_err(|source| InjectError::InvalidSelector {
            location: location.to_string(),
            source,
        })?;

        Ok(Self {
            raw: raw.to_string(),
            selector,
            position,
        })
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// First element under `root` this location points at
    pub fn resolve(&self, tree: &NodeTree, root: NodeId) -> Result<NodeId, InjectError> {
        query_selector(tree, root, &self.selector)
            .ok_or_else(|| InjectError::TargetNotFound(self.raw.clone()))
    }

    /// Insert `el` relative to a `target` returned by [`Location::resolve`]
    pub fn insert(&self, tree: &mut NodeTree, target: NodeId, el: NodeId) {
        match self.position {
            Position::Append => tree.append_child(target, el),
            Position::Before => {
                tree.insert_before(target, el);
            }
            Position::After => {
                tree.insert_after(target, el);
            }
        }
    }
}

/// Insert `el` relative to the first element under `root` matching `location`.
///
/// On error the tree is left unchanged.
pub fn inject_element(
    tree: &mut NodeTree,
    root: NodeId,
    el: NodeId,
    location: &str,
) -> Result<NodeId, InjectError> {
    let location = Location::parse(location)?;
    let target = location.resolve(tree, root)?;
    location.insert(tree, target, el);
    Ok(target)
}
