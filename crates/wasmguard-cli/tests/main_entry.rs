//! Integration tests for the `wasmguard` binary entry point.
//!
//! Covers exit codes, usage output, and in-place rewriting of a Go tree.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::str::contains;

const SOURCE: &str =
    "package unix\n\nfunc write() {\n\t\tr1, _, err := Syscall(SYS_WRITE, fd, ptr, len)\n}\n";
const GUARD: &str =
    "\t\tpanic(\"syscall not supported in wasm: Syscall(SYS_WRITE, fd, ptr, len)\")\n";

#[test]
fn missing_root_exits_with_usage() {
    let mut command = cargo_bin_cmd!("wasmguard");
    command
        .assert()
        .code(1)
        .stderr(contains("Usage"));
}

#[test]
fn rewrites_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let file = dir.path().join("zsyscall.go");
    fs::write(&file, SOURCE).unwrap_or_else(|err| panic!("write: {err}"));

    for _ in 0..2 {
        cargo_bin_cmd!("wasmguard")
            .arg("--no-format")
            .arg(dir.path())
            .assert()
            .success();
    }

    let rewritten = fs::read_to_string(&file).unwrap_or_else(|err| panic!("read: {err}"));
    assert_eq!(rewritten.matches("panic(").count(), 1);
    assert!(rewritten.contains(&format!("{GUARD}\t\tr1, _, err := Syscall(")));
}

#[test]
fn rewritten_file_is_reported() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    fs::write(dir.path().join("zsyscall.go"), SOURCE).unwrap_or_else(|err| panic!("write: {err}"));

    cargo_bin_cmd!("wasmguard")
        .args(["--no-format", "--log-format", "json"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("inserted 1 guard(s) in 1 of 1 Go file(s)"))
        .stderr(contains("zsyscall.go"));
}

#[test]
fn missing_formatter_warns_and_still_writes() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    let file = dir.path().join("zsyscall.go");
    fs::write(&file, SOURCE).unwrap_or_else(|err| panic!("write: {err}"));

    cargo_bin_cmd!("wasmguard")
        .args(["--gofmt", "/nonexistent/gofmt"])
        .arg(dir.path())
        .assert()
        .success()
        .stderr(contains("formatting failed"))
        .stdout(contains("left unformatted"));

    let rewritten = fs::read_to_string(&file).unwrap_or_else(|err| panic!("read: {err}"));
    assert!(rewritten.contains(GUARD));
}

#[test]
fn parse_failure_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));
    fs::write(dir.path().join("broken.go"), "package unix\n\nfunc broken( {\n")
        .unwrap_or_else(|err| panic!("write: {err}"));

    cargo_bin_cmd!("wasmguard")
        .arg("--no-format")
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(contains("broken.go"));
}

#[test]
fn invalid_log_filter_fails() {
    let dir = tempfile::tempdir().unwrap_or_else(|err| panic!("tempdir: {err}"));

    cargo_bin_cmd!("wasmguard")
        .args(["--log-filter", "wasmguard=loud"])
        .arg(dir.path())
        .assert()
        .code(1)
        .stderr(contains("invalid log filter"));
}
