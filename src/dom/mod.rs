//! In-memory document used as the dropdown injection target

pub mod inject;
pub mod render;
pub mod selector;
pub mod tree;

pub use inject::{InjectError, Location, Position, inject_element};
pub use render::{render_dropdown, update_dropdown};
pub use selector::{Selector, SelectorError, query_selector};
pub use tree::{NodeId, NodeKind, NodeTree};
