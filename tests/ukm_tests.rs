//! Canonicalization tests for the built-in `ukm` schema
//!
//! The `ukm` catalog entry models a URL-keyed-metrics configuration file;
//! these tests canonicalize a representative document and pin the exact
//! output.

use pretty_assertions::assert_eq;

use xmlcanon::catalog;
use xmlcanon::error::{Error, ValidationErrorKind};

const SAMPLE: &str = r#"<?xml version="1.0"?>
<!-- Catalog of recorded events. -->
<ukm-configuration>
  <event name="Memory.Experimental">
    <owner>owner@example.com</owner>
    <summary>
      Memory usage, broken down by allocator.
    </summary>
    <metric name="Zeta" semantic_type="bytes"/>
    <metric name="Alpha"/>
  </event>
  <event name="Page.Load" singular="true">
    <owner>a@example.com</owner>
    <owner>b@example.com</owner>
    <metric name="Latency">
      <aggregation>
        <history>
          <index fields="profile.country"/>
          <statistics>
            <quantiles type="std-percentiles"/>
          </statistics>
        </history>
      </aggregation>
    </metric>
  </event>
</ukm-configuration>
"#;

const CANONICAL: &str = "<ukm-configuration>\n\
<event name=\"Memory.Experimental\">\n\
\x20\x20<owner>owner@example.com</owner>\n\
\x20\x20<summary>\n\
\x20\x20\x20\x20Memory usage, broken down by allocator.\n\
\x20\x20</summary>\n\
\x20\x20<metric name=\"Alpha\"/>\n\
\x20\x20<metric name=\"Zeta\" semantic_type=\"bytes\"/>\n\
</event>\n\
\n\
<event name=\"Page.Load\" singular=\"true\">\n\
\x20\x20<owner>a@example.com</owner>\n\
\x20\x20<owner>b@example.com</owner>\n\
\x20\x20<metric name=\"Latency\">\n\
\x20\x20\x20\x20<aggregation>\n\
\x20\x20\x20\x20\x20\x20<history>\n\
\x20\x20\x20\x20\x20\x20\x20\x20<index fields=\"profile.country\"/>\n\
\x20\x20\x20\x20\x20\x20\x20\x20<statistics>\n\
\x20\x20\x20\x20\x20\x20\x20\x20\x20\x20<quantiles type=\"std-percentiles\"/>\n\
\x20\x20\x20\x20\x20\x20\x20\x20</statistics>\n\
\x20\x20\x20\x20\x20\x20</history>\n\
\x20\x20\x20\x20</aggregation>\n\
\x20\x20</metric>\n\
</event>\n\
</ukm-configuration>\n";

#[test]
fn sample_document_canonicalizes_to_golden() {
    let doc = catalog::lookup("ukm").unwrap();
    assert_eq!(doc.canonicalize(SAMPLE).unwrap(), CANONICAL);
}

#[test]
fn canonical_form_is_a_fixed_point() {
    let doc = catalog::lookup("ukm").unwrap();
    assert_eq!(doc.canonicalize(CANONICAL).unwrap(), CANONICAL);
}

#[test]
fn metric_name_pattern_is_enforced() {
    let doc = catalog::lookup("ukm").unwrap();
    let err = doc
        .canonicalize(
            "<ukm-configuration><event name=\"E\">\
               <metric name=\"bad name!\"/>\
             </event></ukm-configuration>",
        )
        .unwrap_err();
    match err {
        Error::Validation(e) => {
            assert!(matches!(
                e.kind,
                ValidationErrorKind::InvalidAttributeValue { .. }
            ));
            assert_eq!(
                e.path.as_deref(),
                Some("/ukm-configuration/event[1]/metric[1]")
            );
        }
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn event_name_allows_dots_but_not_underscores() {
    let doc = catalog::lookup("ukm").unwrap();
    assert!(doc
        .canonicalize("<ukm-configuration><event name=\"Page.Load\"/></ukm-configuration>")
        .is_ok());
    assert!(doc
        .canonicalize("<ukm-configuration><event name=\"Page_Load\"/></ukm-configuration>")
        .is_err());
}

#[test]
fn tri_state_attributes_accept_empty_values() {
    let doc = catalog::lookup("ukm").unwrap();
    // Present-but-unset: validates and survives canonicalization
    let out = doc
        .canonicalize(
            "<ukm-configuration><event name=\"E\" singular=\"\"/></ukm-configuration>",
        )
        .unwrap();
    assert!(out.contains("<event name=\"E\" singular=\"\"/>"));

    let err = doc
        .canonicalize(
            "<ukm-configuration><event name=\"E\" singular=\"maybe\"/></ukm-configuration>",
        )
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn obsolete_block_precedes_owners() {
    let doc = catalog::lookup("ukm").unwrap();
    // Declared group order: obsolete, owner, summary, metric
    let ok = "<ukm-configuration><event name=\"E\">\
              <obsolete>Replaced by E2.</obsolete>\
              <owner>o@example.com</owner>\
              </event></ukm-configuration>";
    assert!(doc.canonicalize(ok).is_ok());

    let out_of_order = "<ukm-configuration><event name=\"E\">\
                        <owner>o@example.com</owner>\
                        <obsolete>Replaced by E2.</obsolete>\
                        </event></ukm-configuration>";
    let err = doc.canonicalize(out_of_order).unwrap_err();
    match err {
        Error::Validation(e) => assert!(matches!(
            e.kind,
            ValidationErrorKind::UnexpectedElement { .. }
        )),
        other => panic!("expected validation error, got {:?}", other),
    }
}
