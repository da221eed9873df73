//! Error types for xmlcanon
//!
//! This module defines all error types used throughout the library.
//! A document is either fully valid or rejected with the first error
//! encountered in document order; there is no partial recovery.

use std::fmt;
use thiserror::Error;

/// Result type alias using xmlcanon Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for xmlcanon operations
#[derive(Error, Debug)]
pub enum Error {
    /// Schema definition error (malformed schema itself, fatal at build time)
    #[error("schema definition error: {0}")]
    Schema(#[from] SchemaError),

    /// Unparseable input text
    #[error("malformed markup: {0}")]
    Markup(#[from] MarkupError),

    /// Document-level validation failure
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error (never raised by the core engine)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error in the schema declarations themselves
///
/// Raised while building the node-type registry. A malformed schema must
/// never silently accept documents, so this error is fatal to the caller.
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// Error message
    pub message: String,
    /// Tag of the node type that caused the error
    pub node_type: Option<String>,
}

impl SchemaError {
    /// Create a new schema error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            node_type: None,
        }
    }

    /// Set the node type tag where the error was detected
    pub fn with_node_type(mut self, tag: impl Into<String>) -> Self {
        self.node_type = Some(tag.into());
        self
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref tag) = self.node_type {
            write!(f, " (node type '{}')", tag)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaError {}

/// Error produced when the input text cannot be read as markup at all
///
/// Covers unclosed tags, mismatched nesting, bad attribute syntax and
/// resource-limit violations. These fail before schema validation begins.
#[derive(Debug, Clone)]
pub struct MarkupError {
    /// Error message
    pub message: String,
    /// Byte offset in the input where reading failed
    pub position: Option<usize>,
}

impl MarkupError {
    /// Create a new markup error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    /// Set the byte offset where reading failed
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

impl fmt::Display for MarkupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(pos) = self.position {
            write!(f, " at byte {}", pos)?;
        }
        Ok(())
    }
}

impl std::error::Error for MarkupError {}

/// Kinds of document-level validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// An element tag not declared as a child of its parent, or declared
    /// but appearing outside its group's relative order
    UnexpectedElement {
        /// The offending element tag
        tag: String,
        /// Tag of the enclosing element
        parent: String,
    },
    /// An attribute not declared in the schema for its element
    UnknownAttribute {
        /// The offending attribute name
        attribute: String,
        /// Tag of the element carrying the attribute
        tag: String,
    },
    /// An attribute value that does not match its declared pattern
    InvalidAttributeValue {
        /// The attribute name
        attribute: String,
        /// The offending value
        value: String,
        /// The declared pattern the value must match in full
        pattern: String,
    },
    /// A child declared as occurring exactly once did not occur
    MissingRequiredElement {
        /// The missing child tag
        tag: String,
        /// Tag of the enclosing element
        parent: String,
    },
    /// A child declared as occurring at most once occurred again
    DuplicateElement {
        /// The repeated child tag
        tag: String,
        /// Tag of the enclosing element
        parent: String,
    },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationErrorKind::UnexpectedElement { tag, parent } => {
                write!(f, "unexpected element '{}' in '{}'", tag, parent)
            }
            ValidationErrorKind::UnknownAttribute { attribute, tag } => {
                write!(f, "unknown attribute '{}' on '{}'", attribute, tag)
            }
            ValidationErrorKind::InvalidAttributeValue {
                attribute,
                value,
                pattern,
            } => write!(
                f,
                "value '{}' of attribute '{}' does not match pattern '{}'",
                value, attribute, pattern
            ),
            ValidationErrorKind::MissingRequiredElement { tag, parent } => {
                write!(f, "required element '{}' missing from '{}'", tag, parent)
            }
            ValidationErrorKind::DuplicateElement { tag, parent } => {
                write!(f, "element '{}' appears more than once in '{}'", tag, parent)
            }
        }
    }
}

/// Document validation error with the path of the offending element
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// What went wrong
    pub kind: ValidationErrorKind,
    /// Path from the document root to the element that failed validation
    pub path: Option<String>,
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(kind: ValidationErrorKind) -> Self {
        Self { kind, path: None }
    }

    /// Set the path where validation failed
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(ref path) = self.path {
            write!(f, "\n\nPath: {}", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
