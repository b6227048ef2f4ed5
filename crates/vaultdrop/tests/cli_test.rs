use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn write_settings(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("vaultdrop.yaml");
    fs::write(
        &path,
        "backend: amazon\namazon:\n  bucket: test-bucket\n  region: eu-west-1\n",
    )
    .unwrap();
    path
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("vdrop").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("bootstrap"))
        .stdout(predicate::str::contains("distribute"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("vdrop").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("vaultdrop"));
}

#[test]
fn test_bootstrap_help() {
    let mut cmd = Command::cargo_bin("vdrop").unwrap();
    cmd.arg("bootstrap")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--manifest"));
}

#[test]
fn test_distribute_help() {
    let mut cmd = Command::cargo_bin("vdrop").unwrap();
    cmd.arg("distribute")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--file"));
}

#[test]
fn test_unsupported_backend_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let settings = write_settings(&dir);

    let mut cmd = Command::cargo_bin("vdrop").unwrap();
    cmd.arg("--config")
        .arg(&settings)
        .arg("--backend")
        .arg("gcloud")
        .arg("distribute")
        .arg("--file")
        .arg("secret.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported backend"));
}

#[test]
fn test_missing_settings_file_fails() {
    let mut cmd = Command::cargo_bin("vdrop").unwrap();
    cmd.arg("--config")
        .arg("/nonexistent/vaultdrop.yaml")
        .arg("distribute")
        .arg("--file")
        .arg("secret.txt")
        .assert()
        .failure();
}

#[test]
fn test_distribute_missing_file_reports_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let settings = write_settings(&dir);

    let mut cmd = Command::cargo_bin("vdrop").unwrap();
    cmd.arg("--config")
        .arg(&settings)
        .arg("distribute")
        .arg("--file")
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read"));
}
