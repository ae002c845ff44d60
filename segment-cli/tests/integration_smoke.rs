//! Smoke tests for argument parsing and startup failures

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_flags() {
    let mut cmd = Command::cargo_bin("segment-service").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--max-connections"))
        .stdout(predicate::str::contains("--bind"))
        .stdout(predicate::str::contains("--skip-migrations"));
}

#[test]
fn test_version() {
    let mut cmd = Command::cargo_bin("segment-service").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("segment-service"));
}

#[test]
fn test_invalid_port_aborts_startup() {
    let mut cmd = Command::cargo_bin("segment-service").unwrap();
    cmd.env("STORAGE_PORT", "not-a-port");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid storage configuration"));
}

#[test]
fn test_rejects_bad_bind_address() {
    let mut cmd = Command::cargo_bin("segment-service").unwrap();
    cmd.arg("--bind").arg("nowhere");

    cmd.assert().failure();
}
