//! Validated document tree
//!
//! Nodes are produced solely by parsing against a schema, live for one
//! canonicalize operation, and are immutable afterwards except for the
//! alphabetizer, which reorders `children` in place before printing.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::schema::NodeType;

/// One element of a validated document tree
#[derive(Debug, Clone)]
pub struct Node {
    node_type: Arc<NodeType>,
    attributes: IndexMap<String, String>,
    children: Vec<Node>,
    text: Option<String>,
}

impl Node {
    pub(crate) fn new(node_type: Arc<NodeType>) -> Self {
        Self {
            node_type,
            attributes: IndexMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    pub(crate) fn set_attribute(&mut self, name: String, value: String) {
        self.attributes.insert(name, value);
    }

    pub(crate) fn add_child(&mut self, child: Node) {
        self.children.push(child);
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = Some(text);
    }

    /// The node type this element validated against
    pub fn node_type(&self) -> &Arc<NodeType> {
        &self.node_type
    }

    /// The element tag
    pub fn tag(&self) -> &str {
        self.node_type.tag()
    }

    /// A validated attribute value, if the attribute was present
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// All present attributes, in source order
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    /// Child nodes in document order
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Mutable access for in-place reordering
    pub(crate) fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    /// Captured text content (leaf nodes only)
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Child nodes with the given tag
    pub fn find_children(&self, tag: &str) -> Vec<&Node> {
        self.children.iter().filter(|n| n.tag() == tag).collect()
    }
}
