//! Canonical rendering
//!
//! Renders a validated, already-alphabetized tree back to markup text.
//! Rendering is purely a function of the tree and the schema: attribute
//! order follows the declared sequence, indentation and blank-line
//! spacing follow each node type's formatting directives, and leaf text
//! is re-indented but never re-wrapped. Printing never re-validates.

use quick_xml::escape::{escape, partial_escape};

use crate::schema::{NodeType, ObjectNodeType, TextNodeType};
use crate::tree::Node;

/// One indentation level
const INDENT: &str = "  ";

/// Render a tree to canonical text, ending with a newline
pub fn print_document(root: &Node) -> String {
    let mut printer = Printer::default();
    printer.print_node(root, 0);
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
}

impl Printer {
    fn print_node(&mut self, node: &Node, depth: usize) {
        match &**node.node_type() {
            NodeType::Text(text_type) => self.print_text_node(node, text_type, depth),
            NodeType::Object(object) => self.print_object_node(node, object, depth),
        }
    }

    fn print_text_node(&mut self, node: &Node, text_type: &TextNodeType, depth: usize) {
        let pad = INDENT.repeat(depth);
        let text = node.text().unwrap_or("");

        if text_type.is_single_line() {
            self.out.push_str(&format!(
                "{}<{}>{}</{}>\n",
                pad,
                text_type.tag(),
                partial_escape(&collapse_whitespace(text)),
                text_type.tag()
            ));
        } else if text.is_empty() {
            self.out
                .push_str(&format!("{}<{}></{}>\n", pad, text_type.tag(), text_type.tag()));
        } else {
            self.out.push_str(&format!("{}<{}>\n", pad, text_type.tag()));
            let inner = INDENT.repeat(depth + 1);
            for line in text.lines() {
                let line = line.trim();
                if line.is_empty() {
                    self.out.push('\n');
                } else {
                    self.out
                        .push_str(&format!("{}{}\n", inner, partial_escape(line)));
                }
            }
            self.out.push_str(&format!("{}</{}>\n", pad, text_type.tag()));
        }
    }

    fn print_object_node(&mut self, node: &Node, object: &ObjectNodeType, depth: usize) {
        let pad = INDENT.repeat(depth);
        let attrs = render_attributes(node, object);

        if object.is_single_line() || node.children().is_empty() {
            self.out.push_str(&pad);
            self.out.push_str(&render_inline(node));
            self.out.push('\n');
            return;
        }

        self.out
            .push_str(&format!("{}<{}{}>\n", pad, object.tag(), attrs));

        let child_depth = depth + usize::from(object.indents_children());
        let mut previous: Option<&Node> = None;
        for child in node.children() {
            if let Some(prev) = previous {
                let blanks = if prev.tag() == child.tag() {
                    child.node_type().extra_newlines().between
                } else {
                    prev.node_type()
                        .extra_newlines()
                        .after
                        .max(child.node_type().extra_newlines().before)
                };
                for _ in 0..blanks {
                    self.out.push('\n');
                }
            }
            self.print_node(child, child_depth);
            previous = Some(child);
        }

        self.out.push_str(&format!("{}</{}>\n", pad, object.tag()));
    }
}

/// Render a node without indentation or line breaks
fn render_inline(node: &Node) -> String {
    match &**node.node_type() {
        NodeType::Text(text_type) => format!(
            "<{}>{}</{}>",
            text_type.tag(),
            partial_escape(&collapse_whitespace(node.text().unwrap_or(""))),
            text_type.tag()
        ),
        NodeType::Object(object) => {
            let attrs = render_attributes(node, object);
            if node.children().is_empty() {
                format!("<{}{}/>", object.tag(), attrs)
            } else {
                let inner: String = node.children().iter().map(render_inline).collect();
                format!("<{}{}>{}</{}>", object.tag(), attrs, inner, object.tag())
            }
        }
    }
}

/// Present attributes in schema declaration order; omitted ones are not printed
fn render_attributes(node: &Node, object: &ObjectNodeType) -> String {
    let mut out = String::new();
    for spec in object.attributes() {
        if let Some(value) = node.attribute(spec.name()) {
            out.push_str(&format!(" {}=\"{}\"", spec.name(), escape(value)));
        }
    }
    out
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
