use std::path::PathBuf;

use pretty_assertions::assert_eq;
use xml_compare_core::{
    compare, compare_with_options, describe_differences, format_json, format_summary,
    is_identical, is_similar, parse, parse_file, ComparisonKind, ComparisonResult, DiffOptions,
    StopPolicy,
};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn full_options() -> DiffOptions {
    DiffOptions {
        stop_policy: StopPolicy::FullEnumeration,
        ..DiffOptions::default()
    }
}

#[test]
fn comparing_a_document_with_itself_finds_nothing() {
    let control = parse_file(&fixture("fixtures/shiporder-control.xml")).expect("control parse");
    let test = parse_file(&fixture("fixtures/shiporder-control.xml")).expect("test parse");

    let report = compare(&control, &test);
    assert!(report.identical);
    assert!(report.similar);
    assert_eq!(report.differences, vec![]);
}

#[test]
fn added_attribute_breaks_similarity() {
    let control = parse(b"<a>1</a>").expect("control parse");
    let test = parse(br#"<a x="1">1</a>"#).expect("test parse");

    assert!(!is_identical(&control, &test));
    assert!(!is_similar(&control, &test));

    let report = compare_with_options(&control, &test, &full_options());
    let kinds: Vec<ComparisonKind> = report
        .differences
        .iter()
        .map(|d| d.comparison.kind)
        .collect();
    assert!(kinds.contains(&ComparisonKind::ElementNumAttributes));
    assert!(kinds.contains(&ComparisonKind::AttrNameLookup));
}

#[test]
fn prefix_only_divergence_stays_similar() {
    let control = parse(br#"<a:x xmlns:a="urn:1">1</a:x>"#).expect("control parse");
    let test = parse(br#"<b:x xmlns:b="urn:1">1</b:x>"#).expect("test parse");

    let report = compare_with_options(&control, &test, &full_options());
    assert!(!report.identical);
    assert!(report.similar);
    assert!(report
        .differences
        .iter()
        .all(|d| d.result == ComparisonResult::Similar));
    assert!(report
        .differences
        .iter()
        .any(|d| d.comparison.kind == ComparisonKind::NamespacePrefix));
}

#[test]
fn modified_fixture_reports_attribute_and_text_changes() {
    let control = parse_file(&fixture("fixtures/shiporder-control.xml")).expect("control parse");
    let test = parse_file(&fixture("fixtures/shiporder-modified.xml")).expect("test parse");

    let report = compare_with_options(&control, &test, &full_options());
    assert!(!report.identical);
    assert!(!report.similar);

    let kinds: Vec<ComparisonKind> = report
        .differences
        .iter()
        .map(|d| d.comparison.kind)
        .collect();
    assert!(kinds.contains(&ComparisonKind::ElementNumAttributes));
    assert!(kinds.contains(&ComparisonKind::TextValue));

    let description = describe_differences(&control, &test);
    assert!(description.contains("number of element attributes"));
    assert!(description.contains("/shiporder[1]/item[1]"));
}

#[test]
fn formatters_render_verdicts_and_kinds() {
    let control = parse(b"<a>1</a>").expect("control parse");
    let test = parse(br#"<a x="1">1</a>"#).expect("test parse");

    let report = compare_with_options(&control, &test, &full_options());
    let summary = format_summary(&report);
    assert!(summary.contains("identical=false"));
    assert!(summary.contains("similar=false"));

    let json = format_json(&report);
    assert!(json.contains("\"identical\": false"));
    assert!(json.contains("\"kind\""));
    assert!(json.contains("element_num_attributes"));
}
