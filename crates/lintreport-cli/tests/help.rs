use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get a Command for the lintreport binary.
#[allow(deprecated)]
fn lintreport_cmd() -> Command {
    Command::cargo_bin("lintreport").unwrap()
}

#[test]
fn help_works() {
    lintreport_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scan"))
        .stdout(predicate::str::contains("ingest"))
        .stdout(predicate::str::contains("explain"));
}

#[test]
fn scan_help_lists_output_flags() {
    lintreport_cmd()
        .args(["scan", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--write-json"))
        .stdout(predicate::str::contains("--fail-on"))
        .stdout(predicate::str::contains("--jobs"));
}

#[test]
fn explain_known_code() {
    lintreport_cmd()
        .args(["explain", "e501"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("E501\n"))
        .stdout(predicate::str::contains("Bucket: cosmetic"));
}

#[test]
fn explain_unknown_code_exits_one() {
    lintreport_cmd()
        .args(["explain", "SIM999"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown code: SIM999"));
}
