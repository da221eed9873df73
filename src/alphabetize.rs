//! Deterministic reordering of alphabetized sibling groups
//!
//! For each object node whose type carries an alphabetization rule for a
//! child tag, every contiguous run of same-tag children is sorted by the
//! rule's key with a stable sort, so ties keep their original relative
//! order. Groups without a rule are left in parse order. This is the one
//! mutation a tree sees between parsing and printing: it is what makes
//! documents authored with differently-ordered repeatable elements
//! converge to the same canonical output.

use std::sync::Arc;

use crate::schema::{NodeType, SortKey};
use crate::tree::Node;

/// Reorder alphabetized sibling groups throughout a tree, in place
pub fn alphabetize(node: &mut Node) {
    let node_type = Arc::clone(node.node_type());

    if let NodeType::Object(object) = &*node_type {
        let children = node.children_mut();
        let mut start = 0;
        while start < children.len() {
            let tag = children[start].tag().to_string();
            let mut end = start + 1;
            while end < children.len() && children[end].tag() == tag {
                end += 1;
            }
            if let Some(key) = object.sort_key(&tag) {
                children[start..end].sort_by_key(|child| sort_key_value(key, child));
            }
            start = end;
        }
    }

    for child in node.children_mut() {
        alphabetize(child);
    }
}

fn sort_key_value(key: &SortKey, node: &Node) -> String {
    match key {
        SortKey::AttributeLowercase(attribute) => {
            node.attribute(attribute).unwrap_or("").to_lowercase()
        }
        SortKey::TextLowercase => node.text().unwrap_or("").to_lowercase(),
    }
}
