//! # xmlcanon
//!
//! A declarative document-schema engine for XML-like configuration files:
//! declare the exact shape a document must take (allowed elements, their
//! attributes, cardinalities and nesting) and enforce that shape while
//! producing a single canonical, diff-friendly rendering regardless of how
//! the input was originally formatted.
//!
//! ## Features
//!
//! - Builder-style schema declarations (leaf text types, object types,
//!   a document root)
//! - Full-match attribute patterns, child cardinalities, group ordering
//! - Deterministic alphabetization of repeatable sibling groups
//! - Canonical pretty-printing driven by per-type formatting directives
//! - Idempotent canonicalization: re-running on the output is a no-op
//!
//! ## Example
//!
//! ```rust,ignore
//! use xmlcanon::{AttributeSpec, ChildSpec, DocumentType, Multiplicity, ObjectNodeType};
//!
//! let item = ObjectNodeType::new("item")
//!     .with_attribute(AttributeSpec::with_pattern("name", "[A-Za-z0-9_.]+")?)
//!     .with_single_line()
//!     .build();
//! let root = ObjectNodeType::new("inventory")
//!     .with_child(ChildSpec::new("item", item, Multiplicity::ZeroOrMore))
//!     .build();
//!
//! let doc = DocumentType::new(root)?;
//! let canonical = doc.canonicalize("<inventory><item  name=\"Widget\"/></inventory>")?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;

// Raw markup reading
pub mod markup;

// Schema declarations and validation
pub mod schema;
pub mod tree;

// Canonicalization pipeline
pub mod alphabetize;
pub mod printer;

// Façade and built-in schemas
pub mod catalog;
pub mod document;

// Re-exports for convenience
pub use document::DocumentType;
pub use error::{Error, Result};
pub use schema::{
    AttributeSpec, ChildSpec, ExtraNewlines, Multiplicity, NodeType, ObjectNodeType, SortKey,
    TextNodeType,
};
pub use tree::Node;

/// Version of the xmlcanon library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
