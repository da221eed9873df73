//! Attribute declarations and value validation
//!
//! Attribute values are plain strings, optionally constrained by a pattern
//! that must match the whole value. There is no further typing and no
//! coercion: validation returns the value unchanged or fails.

use crate::error::{Result, SchemaError, ValidationError, ValidationErrorKind};
use regex::Regex;

/// Compiled, fully-anchored value pattern
///
/// The declared pattern is wrapped as `^(?:pattern)$`, so a value matches
/// only in full. An empty pattern permits any value, including the empty
/// string.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern, anchoring it on both ends
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let anchored = format!("^(?:{})$", source);
        let regex = Regex::new(&anchored).map_err(|e| {
            SchemaError::new(format!("invalid attribute pattern '{}': {}", source, e))
        })?;
        Ok(Self { source, regex })
    }

    /// The pattern as declared, without the added anchors
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Check a value against this pattern
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// Declared attribute of an object node type
///
/// Attributes are optional: an absent attribute never fails validation.
/// A present attribute must match the declared pattern in full, if one
/// was declared. An empty string that matches the pattern is treated as
/// present-but-unset and is preserved on output.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    name: String,
    pattern: Option<Pattern>,
}

impl AttributeSpec {
    /// Declare an attribute accepting any string value
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: None,
        }
    }

    /// Declare an attribute whose values must match a pattern in full
    pub fn with_pattern(name: impl Into<String>, pattern: impl Into<String>) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            pattern: Some(Pattern::new(pattern)?),
        })
    }

    /// The attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared pattern source, if any
    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(|p| p.source())
    }

    /// Validate a raw attribute value against this spec
    ///
    /// Pure function: no coercion is performed, the caller keeps the value
    /// unchanged on success.
    pub fn validate(&self, value: &str) -> std::result::Result<(), ValidationError> {
        match self.pattern {
            Some(ref pattern) if !pattern.is_match(value) => {
                Err(ValidationError::new(ValidationErrorKind::InvalidAttributeValue {
                    attribute: self.name.clone(),
                    value: value.to_string(),
                    pattern: pattern.source().to_string(),
                }))
            }
            _ => Ok(()),
        }
    }
}

/// The tri-state pattern used for boolean-ish flags: empty, `true` or
/// `false`, case-insensitively
pub const TRI_STATE_PATTERN: &str = r"(?i)(|true|false)";
