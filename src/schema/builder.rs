//! Schema-directed tree building
//!
//! Walks a raw element tree top-down against the declared node types and
//! produces a validated [`Node`] tree, or the first validation error in
//! document order. The declared child sequence of each object type defines
//! groups: distinct tags must appear in their declared relative order,
//! while children sharing one repeatable group may repeat freely.

use std::sync::Arc;

use crate::error::{Result, ValidationError, ValidationErrorKind};
use crate::markup::RawElement;
use crate::tree::Node;

use super::node_types::NodeType;

/// Validate a raw tree against a root node type
pub fn build_tree(raw: &RawElement, root: &Arc<NodeType>) -> Result<Node> {
    if raw.tag != root.tag() {
        return Err(ValidationError::new(ValidationErrorKind::UnexpectedElement {
            tag: raw.tag.clone(),
            parent: "document".to_string(),
        })
        .with_path("/")
        .into());
    }

    let mut segments = vec![root.tag().to_string()];
    build_node(raw, root, &mut segments)
}

fn build_node(
    raw: &RawElement,
    node_type: &Arc<NodeType>,
    segments: &mut Vec<String>,
) -> Result<Node> {
    let mut node = Node::new(Arc::clone(node_type));

    match &**node_type {
        NodeType::Text(text_type) => {
            if let Some((name, _)) = raw.attributes.first() {
                return Err(ValidationError::new(ValidationErrorKind::UnknownAttribute {
                    attribute: name.clone(),
                    tag: text_type.tag().to_string(),
                })
                .with_path(path_of(segments))
                .into());
            }
            if let Some(child) = raw.children.first() {
                return Err(ValidationError::new(ValidationErrorKind::UnexpectedElement {
                    tag: child.tag.clone(),
                    parent: text_type.tag().to_string(),
                })
                .with_path(path_of(segments))
                .into());
            }
            node.set_text(raw.text.clone().unwrap_or_default());
        }
        NodeType::Object(object) => {
            for (name, value) in &raw.attributes {
                let Some(spec) = object.attribute(name) else {
                    return Err(ValidationError::new(ValidationErrorKind::UnknownAttribute {
                        attribute: name.clone(),
                        tag: object.tag().to_string(),
                    })
                    .with_path(path_of(segments))
                    .into());
                };
                spec.validate(value)
                    .map_err(|e| e.with_path(path_of(segments)))?;
                node.set_attribute(name.clone(), value.clone());
            }

            let specs = object.children();
            let mut cursor = 0usize;
            let mut counts = vec![0usize; specs.len()];

            for raw_child in &raw.children {
                let Some(index) = specs.iter().position(|s| s.tag() == raw_child.tag) else {
                    segments.push(raw_child.tag.clone());
                    let path = path_of(segments);
                    segments.pop();
                    return Err(ValidationError::new(ValidationErrorKind::UnexpectedElement {
                        tag: raw_child.tag.clone(),
                        parent: object.tag().to_string(),
                    })
                    .with_path(path)
                    .into());
                };
                let spec = &specs[index];
                counts[index] += 1;

                let segment = if spec.multiplicity().allows_repeats() {
                    format!("{}[{}]", spec.tag(), counts[index])
                } else {
                    spec.tag().to_string()
                };
                segments.push(segment);

                // A tag behind the cursor left its declared group and came back
                if index < cursor {
                    let path = path_of(segments);
                    segments.pop();
                    return Err(ValidationError::new(ValidationErrorKind::UnexpectedElement {
                        tag: raw_child.tag.clone(),
                        parent: object.tag().to_string(),
                    })
                    .with_path(path)
                    .into());
                }
                cursor = index;

                if counts[index] > 1 && !spec.multiplicity().allows_repeats() {
                    let path = path_of(segments);
                    segments.pop();
                    return Err(ValidationError::new(ValidationErrorKind::DuplicateElement {
                        tag: raw_child.tag.clone(),
                        parent: object.tag().to_string(),
                    })
                    .with_path(path)
                    .into());
                }

                let child = build_node(raw_child, spec.node_type(), segments)?;
                segments.pop();
                node.add_child(child);
            }

            for (index, spec) in specs.iter().enumerate() {
                if counts[index] == 0 && !spec.multiplicity().allows_absence() {
                    return Err(ValidationError::new(
                        ValidationErrorKind::MissingRequiredElement {
                            tag: spec.tag().to_string(),
                            parent: object.tag().to_string(),
                        },
                    )
                    .with_path(path_of(segments))
                    .into());
                }
            }
        }
    }

    Ok(node)
}

fn path_of(segments: &[String]) -> String {
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, ValidationErrorKind};
    use crate::markup;
    use crate::schema::{
        AttributeSpec, ChildSpec, Multiplicity, ObjectNodeType, TextNodeType,
    };

    fn test_root() -> Arc<NodeType> {
        let summary = TextNodeType::new("summary").build();
        let owner = TextNodeType::new("owner").with_single_line().build();
        let metric = ObjectNodeType::new("metric")
            .with_attribute(AttributeSpec::with_pattern("name", "[A-Za-z0-9_.]+").unwrap())
            .with_attribute(AttributeSpec::new("semantic_type"))
            .build();
        ObjectNodeType::new("config")
            .with_child(ChildSpec::new("owner", owner, Multiplicity::ZeroOrMore))
            .with_child(ChildSpec::new("summary", summary, Multiplicity::ExactlyOne))
            .with_child(ChildSpec::new("metric", metric, Multiplicity::ZeroOrMore))
            .build()
    }

    fn build(xml: &str) -> Result<Node> {
        let raw = markup::parse(xml).unwrap();
        build_tree(&raw, &test_root())
    }

    fn validation_kind(err: Error) -> ValidationErrorKind {
        match err {
            Error::Validation(e) => e.kind,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_document() {
        let node = build(
            "<config>\
               <owner>a@example.com</owner>\
               <summary>Counts.</summary>\
               <metric name=\"Alpha\"/>\
               <metric name=\"Beta\" semantic_type=\"count\"/>\
             </config>",
        )
        .unwrap();

        assert_eq!(node.tag(), "config");
        assert_eq!(node.children().len(), 4);
        assert_eq!(node.find_children("metric").len(), 2);
        assert_eq!(
            node.find_children("metric")[1].attribute("semantic_type"),
            Some("count")
        );
    }

    #[test]
    fn test_wrong_root_tag() {
        let kind = validation_kind(build("<other/>").unwrap_err());
        assert_eq!(
            kind,
            ValidationErrorKind::UnexpectedElement {
                tag: "other".to_string(),
                parent: "document".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_child() {
        let kind = validation_kind(
            build("<config><summary>s</summary><bogus/></config>").unwrap_err(),
        );
        assert_eq!(
            kind,
            ValidationErrorKind::UnexpectedElement {
                tag: "bogus".to_string(),
                parent: "config".to_string()
            }
        );
    }

    #[test]
    fn test_group_order_enforced() {
        // summary is declared after owner; an owner after the summary group
        // has left its declared group
        let err = build("<config><summary>s</summary><owner>o</owner></config>").unwrap_err();
        let kind = validation_kind(err);
        assert_eq!(
            kind,
            ValidationErrorKind::UnexpectedElement {
                tag: "owner".to_string(),
                parent: "config".to_string()
            }
        );
    }

    #[test]
    fn test_missing_required_child() {
        let kind = validation_kind(build("<config><owner>o</owner></config>").unwrap_err());
        assert_eq!(
            kind,
            ValidationErrorKind::MissingRequiredElement {
                tag: "summary".to_string(),
                parent: "config".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_single_child() {
        let kind = validation_kind(
            build("<config><summary>a</summary><summary>b</summary></config>").unwrap_err(),
        );
        assert_eq!(
            kind,
            ValidationErrorKind::DuplicateElement {
                tag: "summary".to_string(),
                parent: "config".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_attribute() {
        let kind = validation_kind(
            build("<config><summary>s</summary><metric name=\"A\" extra=\"1\"/></config>")
                .unwrap_err(),
        );
        assert_eq!(
            kind,
            ValidationErrorKind::UnknownAttribute {
                attribute: "extra".to_string(),
                tag: "metric".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_attribute_value_with_path() {
        let err = build("<config><summary>s</summary><metric name=\"bad name!\"/></config>")
            .unwrap_err();
        match err {
            Error::Validation(e) => {
                assert!(matches!(
                    e.kind,
                    ValidationErrorKind::InvalidAttributeValue { .. }
                ));
                assert_eq!(e.path.as_deref(), Some("/config/metric[1]"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_text_node_rejects_attributes_and_children() {
        let kind = validation_kind(
            build("<config><summary lang=\"en\">s</summary></config>").unwrap_err(),
        );
        assert_eq!(
            kind,
            ValidationErrorKind::UnknownAttribute {
                attribute: "lang".to_string(),
                tag: "summary".to_string()
            }
        );

        let kind = validation_kind(
            build("<config><summary><b>s</b></summary></config>").unwrap_err(),
        );
        assert_eq!(
            kind,
            ValidationErrorKind::UnexpectedElement {
                tag: "b".to_string(),
                parent: "summary".to_string()
            }
        );
    }
}
