//! Schema declarations and validation
//!
//! This module contains the node-type descriptors that make up a schema,
//! the registry that verifies and freezes a schema graph, and the
//! schema-directed tree builder.

pub mod attributes;
pub mod builder;
pub mod node_types;
pub mod registry;

// Re-exports
pub use attributes::{AttributeSpec, Pattern, TRI_STATE_PATTERN};
pub use builder::build_tree;
pub use node_types::{
    ChildSpec, ExtraNewlines, Multiplicity, NodeType, ObjectNodeType, SortKey, TextNodeType,
};
pub use registry::Registry;
