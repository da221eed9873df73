//! Immutable schema registry
//!
//! The registry is built once from a root declaration, verifies the whole
//! schema graph, and is never mutated afterwards. It is the single source
//! of truth consulted by both tree building and canonical printing, and is
//! safe to share read-only across any number of concurrent calls.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{Result, SchemaError};

use super::node_types::{NodeType, ObjectNodeType, SortKey};

/// The resolved, verified set of node types reachable from one root
#[derive(Debug)]
pub struct Registry {
    types: IndexMap<String, Arc<NodeType>>,
    root: Arc<NodeType>,
}

impl Registry {
    /// Build a registry from a root object declaration
    ///
    /// Walks the declaration graph and rejects malformed schemas: duplicate
    /// attribute or child declarations, child tags that disagree with the
    /// referenced type, alphabetization rules naming unknown children or
    /// attributes, single-line nodes declaring multi-line children, and one
    /// tag resolving to two distinct declarations. Failure here is fatal.
    pub fn build(root: Arc<NodeType>) -> Result<Self> {
        if root.as_object().is_none() {
            return Err(SchemaError::new("document root must be an object node type")
                .with_node_type(root.tag())
                .into());
        }

        let mut registry = Self {
            types: IndexMap::new(),
            root: Arc::clone(&root),
        };

        let mut visited: HashSet<*const NodeType> = HashSet::new();
        let mut pending = vec![root];

        while let Some(node_type) = pending.pop() {
            if !visited.insert(Arc::as_ptr(&node_type)) {
                continue;
            }
            registry.register(&node_type)?;

            if let Some(object) = node_type.as_object() {
                verify_object(object)?;
                for child in object.children() {
                    pending.push(Arc::clone(child.node_type()));
                }
            }
        }

        Ok(registry)
    }

    fn register(&mut self, node_type: &Arc<NodeType>) -> Result<()> {
        let tag = node_type.tag().to_string();
        if let Some(existing) = self.types.get(&tag) {
            if !Arc::ptr_eq(existing, node_type) {
                return Err(SchemaError::new(format!(
                    "tag '{}' is declared by two distinct node types",
                    tag
                ))
                .with_node_type(tag)
                .into());
            }
            return Ok(());
        }
        self.types.insert(tag, Arc::clone(node_type));
        Ok(())
    }

    /// The root node type
    pub fn root(&self) -> &Arc<NodeType> {
        &self.root
    }

    /// Look up a declared node type by tag
    pub fn get(&self, tag: &str) -> Option<&Arc<NodeType>> {
        self.types.get(tag)
    }

    /// All declared tags, in discovery order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(|s| s.as_str())
    }

    /// Number of declared node types
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty (never true for a built registry)
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn verify_object(object: &ObjectNodeType) -> Result<()> {
    let mut attribute_names = HashSet::new();
    for spec in object.attributes() {
        if !attribute_names.insert(spec.name()) {
            return Err(SchemaError::new(format!(
                "attribute '{}' declared twice",
                spec.name()
            ))
            .with_node_type(object.tag())
            .into());
        }
    }

    let mut child_tags = HashSet::new();
    for child in object.children() {
        if !child_tags.insert(child.tag()) {
            return Err(SchemaError::new(format!(
                "child tag '{}' declared twice",
                child.tag()
            ))
            .with_node_type(object.tag())
            .into());
        }

        if child.tag() != child.node_type().tag() {
            return Err(SchemaError::new(format!(
                "child tag '{}' references node type '{}'",
                child.tag(),
                child.node_type().tag()
            ))
            .with_node_type(object.tag())
            .into());
        }

        if object.is_single_line() && !child.node_type().is_single_line() {
            return Err(SchemaError::new(format!(
                "single-line node declares multi-line child '{}'",
                child.tag()
            ))
            .with_node_type(object.tag())
            .into());
        }
    }

    for (child_tag, key) in object.alphabetization() {
        let Some(child) = object.child(child_tag) else {
            return Err(SchemaError::new(format!(
                "alphabetization rule for undeclared child '{}'",
                child_tag
            ))
            .with_node_type(object.tag())
            .into());
        };

        if let SortKey::AttributeLowercase(attribute) = key {
            match child.node_type().as_object() {
                Some(child_object) if child_object.attribute(attribute).is_none() => {
                    return Err(SchemaError::new(format!(
                        "alphabetization key attribute '{}' is not declared on '{}'",
                        attribute, child_tag
                    ))
                    .with_node_type(object.tag())
                    .into());
                }
                None => {
                    return Err(SchemaError::new(format!(
                        "alphabetization by attribute '{}' on text child '{}'",
                        attribute, child_tag
                    ))
                    .with_node_type(object.tag())
                    .into());
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}
