//! CLI exit-code behavior

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn batchresize() -> Command {
    Command::cargo_bin("batchresize").unwrap()
}

#[test]
fn missing_input_directory_exits_one() {
    let dir = TempDir::new().unwrap();

    batchresize()
        .args(["process", "--input", "/definitely/not/here"])
        .args(["--output", dir.path().join("out").to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn out_of_range_quality_exits_one() {
    let dir = TempDir::new().unwrap();

    batchresize()
        .args(["process", "--input", dir.path().to_str().unwrap()])
        .args(["--quality", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("quality"));
}

#[test]
fn zero_workers_exits_one() {
    let dir = TempDir::new().unwrap();

    batchresize()
        .args(["process", "--input", dir.path().to_str().unwrap()])
        .args(["--workers", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("worker count"));
}

#[test]
fn zero_dimension_exits_one() {
    let dir = TempDir::new().unwrap();

    batchresize()
        .args(["process", "--input", dir.path().to_str().unwrap()])
        .args(["--width", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("dimensions"));
}

#[test]
fn unknown_format_is_rejected() {
    let dir = TempDir::new().unwrap();

    batchresize()
        .args(["process", "--input", dir.path().to_str().unwrap()])
        .args(["--format", "gif"])
        .assert()
        .failure();
}

#[test]
fn empty_directory_exits_zero() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    batchresize()
        .args(["process", "--input", dir.path().to_str().unwrap()])
        .args(["--output", out.path().to_str().unwrap()])
        .arg("--quiet")
        .assert()
        .success();
}

#[test]
fn per_file_failures_still_exit_zero() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("broken.jpg"), b"not an image").unwrap();
    let out = TempDir::new().unwrap();

    batchresize()
        .args(["process", "--input", dir.path().to_str().unwrap()])
        .args(["--output", out.path().to_str().unwrap()])
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"failed\": 1"));
}
