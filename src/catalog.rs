//! Built-in schema catalog
//!
//! Maps well-known schema names to ready-made document types so callers
//! (and the CLI) can canonicalize known configuration formats without
//! declaring the schema themselves. Entries are built lazily, once per
//! process, and shared read-only.
//!
//! The one built-in entry is `ukm`, the schema of a URL-keyed-metrics
//! catalog: a `ukm-configuration` root holding `event` records, each with
//! ownership and summary text plus `metric` declarations and their
//! aggregation settings.

use once_cell::sync::Lazy;

use crate::document::DocumentType;
use crate::error::Result;
use crate::schema::{
    AttributeSpec, ChildSpec, ExtraNewlines, Multiplicity, ObjectNodeType, SortKey, TextNodeType,
    TRI_STATE_PATTERN,
};

/// Names of all built-in schemas
pub const NAMES: &[&str] = &["ukm"];

static UKM: Lazy<DocumentType> =
    Lazy::new(|| build_ukm().expect("built-in ukm schema is well formed"));

/// Look up a built-in schema by name
pub fn lookup(name: &str) -> Option<&'static DocumentType> {
    match name {
        "ukm" => Some(&UKM),
        _ => None,
    }
}

fn build_ukm() -> Result<DocumentType> {
    // Leaf text types first, then object types in dependency order
    let obsolete = TextNodeType::new("obsolete").build();
    let owner = TextNodeType::new("owner").with_single_line().build();
    let summary = TextNodeType::new("summary").build();

    let enumeration = ObjectNodeType::new("enumeration")
        .with_attribute(AttributeSpec::with_pattern("export", TRI_STATE_PATTERN)?)
        .with_single_line()
        .build();

    let quantiles = ObjectNodeType::new("quantiles")
        .with_attribute(AttributeSpec::new("type"))
        .with_attribute(AttributeSpec::with_pattern("export", TRI_STATE_PATTERN)?)
        .with_single_line()
        .build();

    let index = ObjectNodeType::new("index")
        .with_attribute(AttributeSpec::new("fields"))
        .with_single_line()
        .build();

    let statistics = ObjectNodeType::new("statistics")
        .with_child(ChildSpec::new("quantiles", quantiles, Multiplicity::ZeroOrOne))
        .with_child(ChildSpec::new(
            "enumeration",
            enumeration,
            Multiplicity::ZeroOrOne,
        ))
        .build();

    let history = ObjectNodeType::new("history")
        .with_child(ChildSpec::new("index", index, Multiplicity::ZeroOrMore))
        .with_child(ChildSpec::new(
            "statistics",
            statistics,
            Multiplicity::ZeroOrMore,
        ))
        .build();

    let aggregation = ObjectNodeType::new("aggregation")
        .with_child(ChildSpec::new("history", history, Multiplicity::ZeroOrOne))
        .build();

    let metric = ObjectNodeType::new("metric")
        .with_attribute(AttributeSpec::with_pattern("name", r"[A-Za-z0-9_.]+")?)
        .with_attribute(AttributeSpec::new("semantic_type"))
        .with_child(ChildSpec::new(
            "obsolete",
            obsolete.clone(),
            Multiplicity::ZeroOrOne,
        ))
        .with_child(ChildSpec::new("owner", owner.clone(), Multiplicity::ZeroOrMore))
        .with_child(ChildSpec::new(
            "summary",
            summary.clone(),
            Multiplicity::ZeroOrOne,
        ))
        .with_child(ChildSpec::new(
            "aggregation",
            aggregation,
            Multiplicity::ZeroOrMore,
        ))
        .build();

    let event = ObjectNodeType::new("event")
        .with_attribute(AttributeSpec::with_pattern("name", r"[A-Za-z0-9.]+")?)
        .with_attribute(AttributeSpec::with_pattern("singular", TRI_STATE_PATTERN)?)
        .with_alphabetization("metric", SortKey::AttributeLowercase("name".to_string()))
        .with_extra_newlines(ExtraNewlines::new(1, 1, 1))
        .with_child(ChildSpec::new("obsolete", obsolete, Multiplicity::ZeroOrOne))
        .with_child(ChildSpec::new("owner", owner, Multiplicity::ZeroOrMore))
        .with_child(ChildSpec::new("summary", summary, Multiplicity::ZeroOrOne))
        .with_child(ChildSpec::new("metric", metric, Multiplicity::ZeroOrMore))
        .build();

    let root = ObjectNodeType::new("ukm-configuration")
        .with_extra_newlines(ExtraNewlines::new(2, 1, 1))
        .without_indent()
        .with_child(ChildSpec::new("event", event, Multiplicity::ZeroOrMore))
        .build();

    DocumentType::new(root)
}
