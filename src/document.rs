//! Document type façade
//!
//! A [`DocumentType`] wraps a verified schema registry and ties the engine
//! together: `parse` checks text against the schema, `pretty_print`
//! renders a validated tree, and `canonicalize` composes them with the
//! alphabetizer in between. Canonicalization is idempotent: re-running it
//! on its own output reproduces that output exactly.

use std::sync::Arc;

use serde::Serialize;

use crate::alphabetize::alphabetize;
use crate::error::Result;
use crate::limits::Limits;
use crate::markup;
use crate::printer;
use crate::schema::{build_tree, Multiplicity, NodeType, Registry};
use crate::tree::Node;

/// The whole-file contract: a verified schema plus the façade operations
#[derive(Debug)]
pub struct DocumentType {
    registry: Registry,
    limits: Limits,
}

impl DocumentType {
    /// Build a document type from a root object declaration
    ///
    /// This is the one-time schema build; it verifies the whole declaration
    /// graph and fails with a schema error if anything is malformed.
    pub fn new(root: Arc<NodeType>) -> Result<Self> {
        Ok(Self {
            registry: Registry::build(root)?,
            limits: Limits::default(),
        })
    }

    /// Replace the resource limits applied while reading input
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// The verified schema registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The root node type
    pub fn root(&self) -> &Arc<NodeType> {
        self.registry.root()
    }

    /// Parse markup text into a validated document tree
    ///
    /// Ill-formed markup fails before schema validation begins; any
    /// validation failure aborts with the first error in document order.
    pub fn parse(&self, text: &str) -> Result<Node> {
        let raw = markup::parse_with_limits(text, &self.limits)?;
        build_tree(&raw, self.registry.root())
    }

    /// Render a validated tree to canonical text
    pub fn pretty_print(&self, tree: &Node) -> String {
        printer::print_document(tree)
    }

    /// Parse, alphabetize and re-render: the canonical form of a document
    ///
    /// On failure no output is produced and the caller's input is left
    /// untouched.
    pub fn canonicalize(&self, text: &str) -> Result<String> {
        let mut tree = self.parse(text)?;
        alphabetize(&mut tree);
        Ok(self.pretty_print(&tree))
    }

    /// A serializable description of the schema, for inspection tooling
    pub fn summary(&self) -> SchemaSummary {
        let types = self
            .registry
            .tags()
            .filter_map(|tag| self.registry.get(tag))
            .map(|node_type| TypeSummary::from_node_type(node_type))
            .collect();
        SchemaSummary {
            root: self.registry.root().tag().to_string(),
            types,
        }
    }
}

/// Serializable description of a whole schema
#[derive(Debug, Serialize)]
pub struct SchemaSummary {
    /// Root element tag
    pub root: String,
    /// All declared node types, root first
    pub types: Vec<TypeSummary>,
}

/// Serializable description of one node type
#[derive(Debug, Serialize)]
pub struct TypeSummary {
    /// Element tag
    pub tag: String,
    /// `"text"` or `"object"`
    pub kind: &'static str,
    /// Whether the canonical rendering stays on one line
    pub single_line: bool,
    /// Declared attributes (object types only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeSummary>,
    /// Declared children (object types only)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildSummary>,
}

impl TypeSummary {
    fn from_node_type(node_type: &Arc<NodeType>) -> Self {
        match &**node_type {
            NodeType::Text(t) => Self {
                tag: t.tag().to_string(),
                kind: "text",
                single_line: t.is_single_line(),
                attributes: Vec::new(),
                children: Vec::new(),
            },
            NodeType::Object(o) => Self {
                tag: o.tag().to_string(),
                kind: "object",
                single_line: o.is_single_line(),
                attributes: o
                    .attributes()
                    .iter()
                    .map(|spec| AttributeSummary {
                        name: spec.name().to_string(),
                        pattern: spec.pattern().map(|p| p.to_string()),
                    })
                    .collect(),
                children: o
                    .children()
                    .iter()
                    .map(|child| ChildSummary {
                        tag: child.tag().to_string(),
                        multiplicity: multiplicity_name(child.multiplicity()),
                    })
                    .collect(),
            },
        }
    }
}

/// Serializable description of one declared attribute
#[derive(Debug, Serialize)]
pub struct AttributeSummary {
    /// Attribute name
    pub name: String,
    /// Declared pattern, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Serializable description of one declared child
#[derive(Debug, Serialize)]
pub struct ChildSummary {
    /// Child tag
    pub tag: String,
    /// Occurrence constraint
    pub multiplicity: &'static str,
}

fn multiplicity_name(multiplicity: Multiplicity) -> &'static str {
    match multiplicity {
        Multiplicity::ExactlyOne => "exactly-one",
        Multiplicity::ZeroOrOne => "zero-or-one",
        Multiplicity::ZeroOrMore => "zero-or-more",
    }
}
