//! Arena-backed document tree

use indexmap::IndexMap;

/// Handle to a node of a [`NodeTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        tag: String,
        attributes: IndexMap<String, String>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A document made of element and text nodes.
///
/// Detached nodes stay in the arena and can be inserted again. Removed nodes
/// are recycled, so their ids must not be used afterwards.
#[derive(Debug, Clone, Default)]
pub struct NodeTree {
    nodes: Vec<Node>,
    free: Vec<usize>,
}

impl NodeTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let node = Node {
            kind,
            parent: None,
            children: Vec::new(),
        };
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                NodeId(slot)
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Number of live nodes, attached or not
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: IndexMap::new(),
        })
    }

    /// Create a detached text node
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    /// Create an element with attributes and append it to `parent`
    pub fn append_element(&mut self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let id = self.create_element(tag);
        for (name, value) in attributes {
            self.set_attribute(id, name, value);
        }
        self.append_child(parent, id);
        id
    }

    /// Create a text node and append it to `parent`
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.create_text(text);
        self.append_child(parent, id);
        id
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Child elements, skipping text nodes
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|child| self.is_element(*child))
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.kind(id), NodeKind::Element { .. })
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match self.kind(id) {
            NodeKind::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            NodeKind::Text(_) => None,
        }
    }

    /// Set an attribute; no-op on text nodes
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[id.0].kind {
            attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attribute(id, "class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }

    /// Concatenated text of the node and its descendants
    pub fn text_content(&self, id: NodeId) -> String {
        match self.kind(id) {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element { .. } => self
                .children(id)
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
        }
    }

    /// Descendants of `id` in document order, `id` excluded
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            result.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        result
    }

    /// Remove `id` from its parent, if any
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    /// Append `child` as the last child of `parent`, moving it if attached
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `child` right before `reference`.
    ///
    /// Returns false when `reference` has no parent.
    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) -> bool {
        self.insert_sibling(reference, child, 0)
    }

    /// Insert `child` right after `reference`.
    ///
    /// Returns false when `reference` has no parent.
    pub fn insert_after(&mut self, reference: NodeId, child: NodeId) -> bool {
        self.insert_sibling(reference, child, 1)
    }

    fn insert_sibling(&mut self, reference: NodeId, child: NodeId, offset: usize) -> bool {
        if reference == child {
            return self.parent(reference).is_some();
        }
        self.detach(child);
        let Some(parent) = self.parent(reference) else {
            return false;
        };
        let siblings = &mut self.nodes[parent.0].children;
        let index = siblings
            .iter()
            .position(|sibling| *sibling == reference)
            .map_or(siblings.len(), |index| index + offset);
        siblings.insert(index, child);
        self.nodes[child.0].parent = Some(parent);
        true
    }

    /// Detach `id` and free it together with its descendants
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
        self.release(id);
    }

    /// Remove and free every child of `id`
    pub fn clear_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
            self.release(child);
        }
    }

    fn release(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(slot) = stack.pop() {
            let node = &mut self.nodes[slot.0];
            stack.append(&mut node.children);
            node.parent = None;
            node.kind = NodeKind::Text(String::new());
            self.free.push(slot.0);
        }
    }

    /// Serialize `id` and its descendants as HTML
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        match self.kind(id) {
            NodeKind::Text(text) => out.push_str(&escape(text, false)),
            NodeKind::Element { tag, attributes } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attributes {
                    out.push_str(&format!(" {}=\"{}\"", name, escape(value, true)));
                }
                out.push('>');
                for child in self.children(id) {
                    self.write_html(*child, out);
                }
                out.push_str(&format!("</{}>", tag));
            }
        }
    }
}

fn escape(value: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_serialize() {
        let mut tree = NodeTree::new();
        let root = tree.create_element("DIV");
        let link = tree.append_element(root, "a", &[("href", "/?a=1&b=\"2\"")]);
        tree.append_text(link, "1 < 2");

        assert_eq!(
            tree.outer_html(root),
            "<div><a href=\"/?a=1&amp;b=&quot;2&quot;\">1 &lt; 2</a></div>"
        );
        assert_eq!(tree.text_content(root), "1 < 2");
    }

    #[test]
    fn insert_before_and_after_keep_sibling_order() {
        let mut tree = NodeTree::new();
        let root = tree.create_element("ul");
        let first = tree.append_element(root, "li", &[("id", "first")]);
        let last = tree.append_element(root, "li", &[("id", "last")]);

        let before = tree.create_element("hr");
        let after = tree.create_element("br");
        assert!(tree.insert_before(first, before));
        assert!(tree.insert_after(first, after));

        assert_eq!(tree.children(root), &[before, first, after, last]);
        assert_eq!(tree.parent(after), Some(root));
    }

    #[test]
    fn insert_next_to_detached_node_fails() {
        let mut tree = NodeTree::new();
        let orphan = tree.create_element("div");
        let child = tree.create_element("span");

        assert!(!tree.insert_before(orphan, child));
        assert_eq!(tree.parent(child), None);
    }

    #[test]
    fn append_child_moves_attached_node() {
        let mut tree = NodeTree::new();
        let root = tree.create_element("div");
        let a = tree.append_element(root, "p", &[]);
        let b = tree.append_element(root, "p", &[]);
        let moved = tree.append_element(a, "span", &[]);

        tree.append_child(b, moved);

        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), &[moved]);
    }

    #[test]
    fn descendants_are_in_document_order() {
        let mut tree = NodeTree::new();
        let root = tree.create_element("div");
        let a = tree.append_element(root, "p", &[]);
        let a1 = tree.append_element(a, "span", &[]);
        let b = tree.append_element(root, "p", &[]);

        assert_eq!(tree.descendants(root), vec![a, a1, b]);
    }

    #[test]
    fn clear_children_recycles_removed_nodes() {
        let mut tree = NodeTree::new();
        let root = tree.create_element("ul");
        for _ in 0..3 {
            let li = tree.append_element(root, "li", &[]);
            tree.append_text(li, "item");
        }
        assert_eq!(tree.node_count(), 7);

        for _ in 0..10 {
            tree.clear_children(root);
            let li = tree.append_element(root, "li", &[]);
            tree.append_text(li, "item");
        }

        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.outer_html(root), "<ul><li>item</li></ul>");
    }

    #[test]
    fn remove_frees_subtree_and_detaches_it() {
        let mut tree = NodeTree::new();
        let root = tree.create_element("div");
        let kept = tree.append_element(root, "p", &[]);
        let removed = tree.append_element(root, "section", &[]);
        tree.append_element(removed, "span", &[]);

        tree.remove(removed);

        assert_eq!(tree.children(root), &[kept]);
        assert_eq!(tree.node_count(), 2);
        let reused = tree.create_element("hr");
        assert_eq!(tree.node_count(), 3);
        assert_eq!(tree.parent(reused), None);
        assert!(tree.children(reused).is_empty());
    }

    #[test]
    fn has_class_matches_whole_class_names() {
        let mut tree = NodeTree::new();
        let node = tree.create_element("div");
        tree.set_attribute(node, "class", "nav-links  sidebar");

        assert!(tree.has_class(node, "sidebar"));
        assert!(!tree.has_class(node, "nav"));
    }
}
