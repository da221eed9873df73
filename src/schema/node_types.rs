//! Node-type descriptors
//!
//! A schema is a graph of node-type declarations: leaf text types holding
//! one opaque text blob, and object types carrying attribute constraints,
//! child-element constraints and formatting directives. Types are declared
//! bottom-up (leaves first, then objects in dependency order), so every
//! child reference points at an already-built type and the graph is
//! acyclic by construction.

use std::sync::Arc;

use indexmap::IndexMap;

use super::attributes::AttributeSpec;

/// Occurrence constraint for one declared child tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    /// The child must occur exactly once
    ExactlyOne,
    /// The child may occur at most once
    ZeroOrOne,
    /// The child may occur any number of times
    ZeroOrMore,
}

impl Multiplicity {
    /// Whether more than one occurrence is allowed
    pub fn allows_repeats(&self) -> bool {
        matches!(self, Multiplicity::ZeroOrMore)
    }

    /// Whether zero occurrences are allowed
    pub fn allows_absence(&self) -> bool {
        !matches!(self, Multiplicity::ExactlyOne)
    }
}

/// Blank-line directives for a node type's canonical rendering
///
/// Counts of blank lines before the opening tag (suppressed for the first
/// child of a parent), between consecutive same-tag siblings, and after
/// the closing tag (suppressed for the last child).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtraNewlines {
    /// Blank lines before the opening tag
    pub before: usize,
    /// Blank lines between consecutive same-tag siblings
    pub between: usize,
    /// Blank lines after the closing tag
    pub after: usize,
}

impl ExtraNewlines {
    /// Create a spacing directive
    pub const fn new(before: usize, between: usize, after: usize) -> Self {
        Self {
            before,
            between,
            after,
        }
    }
}

/// Sort key for one alphabetized child group
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// The lower-cased value of a named attribute; children missing the
    /// attribute sort as the empty string
    AttributeLowercase(String),
    /// The lower-cased text content of a leaf child
    TextLowercase,
}

/// Declared child of an object node type
///
/// Child specs form a fixed sequence per parent. That sequence defines
/// the required relative order of distinct tags in the source and the
/// rendered order in the canonical output.
#[derive(Debug, Clone)]
pub struct ChildSpec {
    tag: String,
    node_type: Arc<NodeType>,
    multiplicity: Multiplicity,
}

impl ChildSpec {
    /// Declare a child slot for a previously-built node type
    ///
    /// The tag must match the referenced type's own tag; the registry
    /// rejects a mismatch when the schema is built.
    pub fn new(
        tag: impl Into<String>,
        node_type: Arc<NodeType>,
        multiplicity: Multiplicity,
    ) -> Self {
        Self {
            tag: tag.into(),
            node_type,
            multiplicity,
        }
    }

    /// The declared child tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The referenced node type
    pub fn node_type(&self) -> &Arc<NodeType> {
        &self.node_type
    }

    /// The occurrence constraint
    pub fn multiplicity(&self) -> Multiplicity {
        self.multiplicity
    }
}

/// Leaf node type holding a single opaque text blob
///
/// Text nodes accept no attributes and no children.
#[derive(Debug, Clone)]
pub struct TextNodeType {
    tag: String,
    single_line: bool,
}

impl TextNodeType {
    /// Declare a multi-line text node type
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            single_line: false,
        }
    }

    /// Render this node's tag and text on a single line
    pub fn with_single_line(mut self) -> Self {
        self.single_line = true;
        self
    }

    /// The element tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Whether the canonical rendering stays on one line
    pub fn is_single_line(&self) -> bool {
        self.single_line
    }

    /// Finish the declaration
    pub fn build(self) -> Arc<NodeType> {
        Arc::new(NodeType::Text(self))
    }
}

/// Structured node type with attributes and declared children
#[derive(Debug, Clone)]
pub struct ObjectNodeType {
    tag: String,
    attributes: Vec<AttributeSpec>,
    children: Vec<ChildSpec>,
    alphabetization: IndexMap<String, SortKey>,
    extra_newlines: ExtraNewlines,
    single_line: bool,
    indent: bool,
}

impl ObjectNodeType {
    /// Declare an object node type
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            alphabetization: IndexMap::new(),
            extra_newlines: ExtraNewlines::default(),
            single_line: false,
            indent: true,
        }
    }

    /// Append an attribute declaration; declaration order is rendering order
    pub fn with_attribute(mut self, spec: AttributeSpec) -> Self {
        self.attributes.push(spec);
        self
    }

    /// Append a child declaration; declaration order is group order
    pub fn with_child(mut self, child: ChildSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Alphabetize runs of one child tag by the given key
    pub fn with_alphabetization(mut self, child_tag: impl Into<String>, key: SortKey) -> Self {
        self.alphabetization.insert(child_tag.into(), key);
        self
    }

    /// Set the blank-line directives for this node type
    pub fn with_extra_newlines(mut self, extra_newlines: ExtraNewlines) -> Self {
        self.extra_newlines = extra_newlines;
        self
    }

    /// Render this node entirely on one line
    pub fn with_single_line(mut self) -> Self {
        self.single_line = true;
        self
    }

    /// Do not introduce an indentation level for children of this node
    ///
    /// Document roots suppress their own indent so top-level children
    /// start at column zero.
    pub fn without_indent(mut self) -> Self {
        self.indent = false;
        self
    }

    /// The element tag
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Declared attributes in declaration order
    pub fn attributes(&self) -> &[AttributeSpec] {
        &self.attributes
    }

    /// Look up an attribute declaration by name
    pub fn attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|spec| spec.name() == name)
    }

    /// Declared children in declaration order
    pub fn children(&self) -> &[ChildSpec] {
        &self.children
    }

    /// Look up a child declaration by tag
    pub fn child(&self, tag: &str) -> Option<&ChildSpec> {
        self.children.iter().find(|spec| spec.tag() == tag)
    }

    /// Alphabetization rules keyed by child tag
    pub fn alphabetization(&self) -> &IndexMap<String, SortKey> {
        &self.alphabetization
    }

    /// The sort key for one child tag, if that group is alphabetized
    pub fn sort_key(&self, child_tag: &str) -> Option<&SortKey> {
        self.alphabetization.get(child_tag)
    }

    /// The blank-line directives
    pub fn extra_newlines(&self) -> ExtraNewlines {
        self.extra_newlines
    }

    /// Whether the canonical rendering stays on one line
    pub fn is_single_line(&self) -> bool {
        self.single_line
    }

    /// Whether children are indented one level deeper than this node
    pub fn indents_children(&self) -> bool {
        self.indent
    }

    /// Finish the declaration
    pub fn build(self) -> Arc<NodeType> {
        Arc::new(NodeType::Object(self))
    }
}

/// A declared node type: leaf text or structured object
#[derive(Debug, Clone)]
pub enum NodeType {
    /// Leaf holding one opaque text blob
    Text(TextNodeType),
    /// Structured node with attributes and children
    Object(ObjectNodeType),
}

impl NodeType {
    /// The element tag
    pub fn tag(&self) -> &str {
        match self {
            NodeType::Text(t) => t.tag(),
            NodeType::Object(o) => o.tag(),
        }
    }

    /// Whether the canonical rendering stays on one line
    pub fn is_single_line(&self) -> bool {
        match self {
            NodeType::Text(t) => t.is_single_line(),
            NodeType::Object(o) => o.is_single_line(),
        }
    }

    /// The blank-line directives (text nodes have none)
    pub fn extra_newlines(&self) -> ExtraNewlines {
        match self {
            NodeType::Text(_) => ExtraNewlines::default(),
            NodeType::Object(o) => o.extra_newlines(),
        }
    }

    /// The object variant, if this is an object type
    pub fn as_object(&self) -> Option<&ObjectNodeType> {
        match self {
            NodeType::Object(o) => Some(o),
            NodeType::Text(_) => None,
        }
    }

    /// Whether this is a leaf text type
    pub fn is_text(&self) -> bool {
        matches!(self, NodeType::Text(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_node_type() {
        let owner = TextNodeType::new("owner").with_single_line().build();
        assert_eq!(owner.tag(), "owner");
        assert!(owner.is_single_line());
        assert!(owner.is_text());
        assert!(owner.as_object().is_none());
    }

    #[test]
    fn test_object_node_type_builders() {
        let summary = TextNodeType::new("summary").build();
        let event = ObjectNodeType::new("event")
            .with_attribute(AttributeSpec::new("name"))
            .with_child(ChildSpec::new("summary", summary, Multiplicity::ExactlyOne))
            .with_alphabetization("summary", SortKey::TextLowercase)
            .with_extra_newlines(ExtraNewlines::new(1, 1, 1))
            .build();

        let object = event.as_object().unwrap();
        assert_eq!(object.tag(), "event");
        assert!(object.attribute("name").is_some());
        assert!(object.attribute("nope").is_none());
        assert_eq!(object.children().len(), 1);
        assert_eq!(
            object.child("summary").unwrap().multiplicity(),
            Multiplicity::ExactlyOne
        );
        assert_eq!(object.sort_key("summary"), Some(&SortKey::TextLowercase));
        assert_eq!(object.extra_newlines(), ExtraNewlines::new(1, 1, 1));
        assert!(object.indents_children());
    }

    #[test]
    fn test_multiplicity() {
        assert!(Multiplicity::ZeroOrMore.allows_repeats());
        assert!(!Multiplicity::ZeroOrOne.allows_repeats());
        assert!(Multiplicity::ZeroOrOne.allows_absence());
        assert!(!Multiplicity::ExactlyOne.allows_absence());
    }
}
