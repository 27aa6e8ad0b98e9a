use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

#[test]
fn inspect_renders_the_document_tree() {
    Command::new(assert_cmd::cargo::cargo_bin!("xmlsame"))
        .arg("inspect")
        .arg(fixture("fixtures/shiporder-control.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("shiporder"))
        .stdout(predicate::str::contains("orderperson"));
}

#[test]
fn inspect_depth_limits_the_tree() {
    Command::new(assert_cmd::cargo::cargo_bin!("xmlsame"))
        .arg("inspect")
        .arg(fixture("fixtures/shiporder-control.xml"))
        .arg("--depth")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::contains("shiporder"))
        .stdout(predicate::str::contains("orderperson").not());
}
