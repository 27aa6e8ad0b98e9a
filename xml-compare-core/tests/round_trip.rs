use std::path::PathBuf;

use pretty_assertions::assert_eq;
use xml_compare_core::{parse, parse_file, write, write_file};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn parse_write_parse_preserves_tree_shape() {
    for name in [
        "fixtures/shiporder-control.xml",
        "fixtures/note-doctype.xml",
    ] {
        let first = parse_file(&fixture(name)).expect("initial parse should succeed");
        let written = write(&first).expect("write should succeed");
        let second = parse(&written).expect("re-parse should succeed");
        assert_eq!(first, second);
    }
}

#[test]
fn write_file_round_trips_through_disk() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("roundtrip.xml");

    let doc = parse_file(&fixture("fixtures/shiporder-control.xml")).expect("parse");
    write_file(&doc, &path).expect("write_file should succeed");

    let reparsed = parse_file(&path).expect("parse_file should succeed");
    assert_eq!(doc, reparsed);
}
