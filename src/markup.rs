//! Raw markup reading
//!
//! This module turns input text into an untyped element tree using a
//! streaming event loop. No namespace handling, no DTDs, no processing
//! instructions: ill-formed markup fails here with a [`MarkupError`]
//! before schema validation even begins.

use crate::error::{Error, MarkupError, Result};
use crate::limits::Limits;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Element of the raw, not-yet-validated tree
#[derive(Debug, Clone)]
pub struct RawElement {
    /// Element tag
    pub tag: String,
    /// Attributes in source order
    pub attributes: Vec<(String, String)>,
    /// Accumulated text content (if any)
    pub text: Option<String>,
    /// Child elements in source order
    pub children: Vec<RawElement>,
}

impl RawElement {
    /// Create a new element
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Get an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Add a child element
    pub fn add_child(&mut self, child: RawElement) {
        self.children.push(child);
    }

    /// Append a text fragment, separated from earlier fragments by a newline
    pub fn append_text(&mut self, fragment: &str) {
        match self.text {
            Some(ref mut text) => {
                text.push('\n');
                text.push_str(fragment);
            }
            None => self.text = Some(fragment.to_string()),
        }
    }
}

/// Parse markup text into a raw element tree with default limits
pub fn parse(text: &str) -> Result<RawElement> {
    parse_with_limits(text, &Limits::default())
}

/// Parse markup text into a raw element tree
///
/// Comments, the XML declaration and doctype lines are tolerated and
/// dropped. Text fragments are trimmed per fragment; internal line
/// structure of a fragment is preserved.
pub fn parse_with_limits(text: &str, limits: &Limits) -> Result<RawElement> {
    limits.check_input_size(text.len())?;

    let mut reader = Reader::from_reader(text.as_bytes());
    reader.trim_text(true);

    let mut element_stack: Vec<RawElement> = Vec::new();
    let mut root: Option<RawElement> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                if root.is_some() && element_stack.is_empty() {
                    return Err(markup_error(&reader, "multiple root elements"));
                }
                limits.check_depth(element_stack.len() + 1)?;
                let element = read_element(&e, &reader, limits)?;
                element_stack.push(element);
            }
            Ok(Event::End(_)) => {
                // quick-xml rejects mismatched end-tag names itself
                match element_stack.pop() {
                    Some(current) => {
                        if let Some(parent) = element_stack.last_mut() {
                            parent.add_child(current);
                        } else {
                            root = Some(current);
                        }
                    }
                    None => {
                        return Err(markup_error(&reader, "closing tag without opening tag"));
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                if root.is_some() && element_stack.is_empty() {
                    return Err(markup_error(&reader, "multiple root elements"));
                }
                limits.check_depth(element_stack.len() + 1)?;
                let element = read_element(&e, &reader, limits)?;
                if let Some(parent) = element_stack.last_mut() {
                    parent.add_child(element);
                } else {
                    root = Some(element);
                }
            }
            Ok(Event::Text(e)) => {
                let fragment = e
                    .unescape()
                    .map_err(|e| markup_error(&reader, format!("failed to unescape text: {}", e)))?;
                match element_stack.last_mut() {
                    Some(current) => current.append_text(fragment.trim()),
                    None => {
                        return Err(markup_error(&reader, "text content outside of root element"));
                    }
                }
            }
            Ok(Event::CData(e)) => {
                let bytes = e.into_inner();
                let fragment = std::str::from_utf8(&bytes)
                    .map_err(|e| markup_error(&reader, format!("CDATA is not UTF-8: {}", e)))?;
                match element_stack.last_mut() {
                    Some(current) => current.append_text(fragment),
                    None => {
                        return Err(markup_error(&reader, "text content outside of root element"));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::Markup(
                    MarkupError::new(format!("{}", e)).with_position(reader.buffer_position()),
                ));
            }
            _ => {} // Declaration, comments, processing instructions, doctype
        }
        buf.clear();
    }

    if let Some(unclosed) = element_stack.last() {
        return Err(markup_error(
            &reader,
            format!("unclosed element '{}'", unclosed.tag),
        ));
    }

    root.ok_or_else(|| MarkupError::new("document contains no root element").into())
}

/// Read tag and attributes from a start or empty-element event
fn read_element(
    start: &BytesStart,
    reader: &Reader<&[u8]>,
    limits: &Limits,
) -> Result<RawElement> {
    let name_bytes = start.name();
    let tag = std::str::from_utf8(name_bytes.as_ref())
        .map_err(|e| markup_error(reader, format!("invalid element name: {}", e)))?
        .to_string();

    let mut element = RawElement::new(tag);

    let mut attrs = start.attributes();
    attrs.with_checks(false);
    for attr_result in attrs {
        let attr = attr_result
            .map_err(|e| markup_error(reader, format!("failed to parse attribute: {}", e)))?;

        let name = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| markup_error(reader, format!("invalid attribute name: {}", e)))?
            .to_string();

        let value = attr
            .unescape_value()
            .map_err(|e| markup_error(reader, format!("failed to unescape attribute value: {}", e)))?
            .to_string();

        if element.attribute(&name).is_some() {
            return Err(markup_error(
                reader,
                format!("duplicate attribute '{}' on '{}'", name, element.tag),
            ));
        }
        element.attributes.push((name, value));
    }

    limits.check_attributes(element.attributes.len())?;
    Ok(element)
}

fn markup_error(reader: &Reader<&[u8]>, message: impl Into<String>) -> Error {
    Error::Markup(MarkupError::new(message).with_position(reader.buffer_position()))
}
