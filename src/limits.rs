//! Limits and constraints for document processing
//!
//! This module defines limits applied while reading raw markup, to protect
//! against hostile or runaway inputs (deep nesting, oversized documents).

use crate::error::{MarkupError, Result};

/// Resource limits applied to one canonicalize call
#[derive(Debug, Clone)]
pub struct Limits {
    /// Maximum element nesting depth
    pub max_depth: usize,

    /// Maximum input size in bytes
    pub max_input_size: usize,

    /// Maximum number of attributes per element
    pub max_attributes: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_input_size: 64 * 1024 * 1024, // 64 MB
            max_attributes: 256,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_depth: 32,
            max_input_size: 1024 * 1024, // 1 MB
            max_attributes: 32,
        }
    }

    /// Check an element nesting depth against the limit
    pub fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(MarkupError::new(format!(
                "element nesting depth {} exceeds limit {}",
                depth, self.max_depth
            ))
            .into());
        }
        Ok(())
    }

    /// Check the input size against the limit
    pub fn check_input_size(&self, size: usize) -> Result<()> {
        if size > self.max_input_size {
            return Err(MarkupError::new(format!(
                "input size {} bytes exceeds limit {}",
                size, self.max_input_size
            ))
            .into());
        }
        Ok(())
    }

    /// Check an element's attribute count against the limit
    pub fn check_attributes(&self, count: usize) -> Result<()> {
        if count > self.max_attributes {
            return Err(MarkupError::new(format!(
                "attribute count {} exceeds limit {}",
                count, self.max_attributes
            ))
            .into());
        }
        Ok(())
    }
}
