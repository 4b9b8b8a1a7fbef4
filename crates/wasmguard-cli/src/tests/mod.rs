//! In-process tests for the CLI runtime.

use std::ffi::OsString;
use std::fs;
use std::process::ExitCode;

use rstest::rstest;

use super::*;

fn run_with(args: &[&str]) -> (ExitCode, String, String) {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let argv = std::iter::once("wasmguard")
        .chain(args.iter().copied())
        .map(OsString::from);
    let code = run(argv, &mut stdout, &mut stderr);
    (
        code,
        String::from_utf8(stdout).expect("utf-8 stdout"),
        String::from_utf8(stderr).expect("utf-8 stderr"),
    )
}

#[test]
fn missing_root_prints_usage_and_fails() {
    let (code, stdout, stderr) = run_with(&[]);

    assert_eq!(code, ExitCode::FAILURE);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[rstest]
#[case("--help")]
#[case("--version")]
fn informational_flags_succeed_on_stdout(#[case] flag: &str) {
    let (code, stdout, stderr) = run_with(&[flag]);

    assert_eq!(code, ExitCode::SUCCESS);
    assert!(stdout.contains("wasmguard"), "stdout: {stdout}");
    assert!(stderr.is_empty());
}

#[test]
fn rewrites_tree_and_prints_summary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("sys.go");
    fs::write(&file, "package unix\n\nfunc f() {\n\tSyscall(1, 0, 0, 0)\n}\n").expect("write");
    let root = dir.path().to_str().expect("utf-8 path");

    let (code, stdout, stderr) = run_with(&["--no-format", root]);

    assert_eq!(code, ExitCode::SUCCESS, "stderr: {stderr}");
    assert_eq!(stdout, "inserted 1 guard(s) in 1 of 1 Go file(s)\n");
    assert!(fs::read_to_string(&file)
        .expect("read")
        .contains("panic(\"syscall not supported in wasm: Syscall(1, 0, 0, 0)\")"));
}

#[test]
fn parse_failure_names_the_file_and_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("broken.go"), "package unix\n\nfunc broken( {\n").expect("write");
    let root = dir.path().to_str().expect("utf-8 path");

    let (code, _, stderr) = run_with(&["--no-format", root]);

    assert_eq!(code, ExitCode::FAILURE);
    assert!(stderr.starts_with("error: failed to parse"), "stderr: {stderr}");
    assert!(stderr.contains("broken.go"), "stderr: {stderr}");
}

#[rstest]
#[case(false, "inserted 3 guard(s) in 2 of 5 Go file(s)")]
#[case(true, "would insert 3 guard(s) in 2 of 5 Go file(s)")]
fn summary_wording(#[case] dry_run: bool, #[case] expected: &str) {
    let report = TreeReport {
        files_visited: 5,
        files_rewritten: 2,
        insertions: 3,
        format_fallbacks: 0,
    };

    assert_eq!(summary(&report, dry_run), expected);
}

#[test]
fn summary_mentions_format_fallbacks() {
    let report = TreeReport {
        files_visited: 1,
        files_rewritten: 1,
        insertions: 1,
        format_fallbacks: 1,
    };

    assert!(summary(&report, false).ends_with("; 1 file(s) left unformatted"));
}
