use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn normalize_strips_comments_and_whitespace_into_output_file() {
    let dir = tempdir().expect("tempdir");
    let out = dir.path().join("normalized.xml");

    Command::new(assert_cmd::cargo::cargo_bin!("xmlsame"))
        .arg("normalize")
        .arg(fixture("fixtures/note-doctype.xml"))
        .arg("--strip-comments")
        .arg("--trim-text")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let contents = fs::read_to_string(out).expect("output file should be readable");
    assert!(!contents.contains("<!--"));
    assert!(contents.contains("<to>Tove</to>"));
    assert!(contents.contains("<!DOCTYPE note"));
}

#[test]
fn normalize_prints_to_stdout_by_default() {
    Command::new(assert_cmd::cargo::cargo_bin!("xmlsame"))
        .arg("normalize")
        .arg(fixture("fixtures/shiporder-control.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("<shiporder"));
}
