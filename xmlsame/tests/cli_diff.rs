use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn xmlsame() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("xmlsame"))
}

#[test]
fn diff_identical_documents_exits_zero() {
    xmlsame()
        .arg("diff")
        .arg(fixture("fixtures/shiporder-control.xml"))
        .arg(fixture("fixtures/shiporder-control.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("identical=true"));
}

#[test]
fn diff_modified_document_exits_one_and_lists_differences() {
    xmlsame()
        .arg("diff")
        .arg(fixture("fixtures/shiporder-control.xml"))
        .arg(fixture("fixtures/shiporder-modified.xml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("identical=false"))
        .stdout(predicate::str::contains("number of element attributes"));
}

#[test]
fn diff_prefix_change_is_similar() {
    xmlsame()
        .arg("diff")
        .arg(fixture("fixtures/shiporder-control.xml"))
        .arg(fixture("fixtures/shiporder-prefix.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("similar=true"))
        .stdout(predicate::str::contains("namespace prefix"));
}

#[test]
fn diff_json_outputs_structured_report() {
    xmlsame()
        .arg("diff")
        .arg(fixture("fixtures/shiporder-control.xml"))
        .arg(fixture("fixtures/shiporder-modified.xml"))
        .arg("--format")
        .arg("json")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"identical\""))
        .stdout(predicate::str::contains("\"kind\""));
}

#[test]
fn diff_reorder_flag_changes_the_verdict() {
    xmlsame()
        .arg("diff")
        .arg(fixture("fixtures/shiporder-control.xml"))
        .arg(fixture("fixtures/shiporder-reordered.xml"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("sequence of child nodes"));

    xmlsame()
        .arg("diff")
        .arg(fixture("fixtures/shiporder-control.xml"))
        .arg(fixture("fixtures/shiporder-reordered.xml"))
        .arg("--reorder-similar")
        .assert()
        .success()
        .stdout(predicate::str::contains("similar=true"));
}

#[test]
fn diff_missing_file_exits_two() {
    xmlsame()
        .arg("diff")
        .arg(fixture("fixtures/shiporder-control.xml"))
        .arg(fixture("fixtures/no-such-file.xml"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to parse"));
}
