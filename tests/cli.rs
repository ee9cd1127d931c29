//! CLI surface smoke tests. These never reach the probe loop.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_core_flags() {
    Command::cargo_bin("netgauge")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--duration"))
        .stdout(predicate::str::contains("--count"))
        .stdout(predicate::str::contains("--scheme"))
        .stdout(predicate::str::contains("--lang"));
}

#[test]
fn rejects_unknown_flag() {
    Command::cargo_bin("netgauge")
        .unwrap()
        .arg("--definitely-not-a-flag")
        .assert()
        .failure();
}

#[test]
fn duration_conflicts_with_count() {
    Command::cargo_bin("netgauge")
        .unwrap()
        .args(["--duration", "10s", "--count", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
