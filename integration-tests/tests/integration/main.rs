// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests
//!
//! These tests run a "testlog-dup" binary, which is exactly the same as testlog. Using a separate
//! binary means cargo never has to replace the testlog binary while it's running, which is
//! forbidden on Windows.
//!
//! The test program is "fake-test", which prints its arguments as output lines.

use indoc::indoc;
use pretty_assertions::assert_eq;
use test_case::test_case;
use testlog_runner::exit_codes::TestLogExitCode;

mod fixtures;

use fixtures::*;

#[test_case(&["PASS: a", "PASS: b"], TestLogExitCode::OK ; "all passing")]
#[test_case(&["PASS: a", "FAIL: b"], TestLogExitCode::TEST_OUTPUT_MISMATCH ; "one failure")]
#[test_case(&["FAIL"], TestLogExitCode::TEST_OUTPUT_MISMATCH ; "bare failure status")]
#[test_case(&["XFAIL: a", "FAIL : b", "FAILED: c"], TestLogExitCode::OK ; "status must equal FAIL")]
#[test_case(&["  FAIL: a  "], TestLogExitCode::TEST_OUTPUT_MISMATCH ; "lines are trimmed")]
#[test_case(&[], TestLogExitCode::OK ; "no output")]
#[test_case(
    &["", "PASS: a", "FAIL WARNING: field destructors ignored", "\t"],
    TestLogExitCode::OK
    ; "noise and blank lines are dropped"
)]
fn fail_markers(lines: &[&str], expected_code: i32) {
    let output = testlog()
        .arg(fake_test().as_str())
        .args(lines.iter().copied())
        .unchecked(true)
        .output();
    assert_exit_code(&output, expected_code);
}

#[test]
fn fail_marker_report() {
    let output = testlog()
        .args([fake_test().as_str(), "PASS: a", "FAIL: b", "FAIL: c: d"])
        .unchecked(true)
        .output();
    assert_exit_code(&output, TestLogExitCode::TEST_OUTPUT_MISMATCH);
    assert_eq!(
        output.stderr_as_str(),
        indoc! {"
            2 of 3 results failed:
              line 2: FAIL: b
              line 3: FAIL: c: d
            error: test reported 2 failures
        "}
    );
}

#[test]
fn ignore_line() {
    let output = testlog()
        .args(["--ignore-line", "known flake", "--ignore-line", "FAIL: c"])
        .args([fake_test().as_str(), "PASS: a", "FAIL: b (known flake)", "FAIL: c"])
        .output();
    assert_exit_code(&output, TestLogExitCode::OK);
}

#[test_case("PASS: a\nPASS: b\n", &["PASS: a", "PASS: b"], TestLogExitCode::OK ; "identical")]
#[test_case("  PASS: a\t\nPASS: b  \n", &["PASS: a", "PASS: b"], TestLogExitCode::OK ; "expected is trimmed")]
#[test_case("PASS: a\n\n\n", &["PASS: a"], TestLogExitCode::OK ; "trailing blank expected lines")]
#[test_case("PASS: a\n", &["PASS: a", "PASS: b"], TestLogExitCode::TEST_OUTPUT_MISMATCH ; "extra output")]
#[test_case("PASS: a\nPASS: b\n", &["PASS: a"], TestLogExitCode::TEST_OUTPUT_MISMATCH ; "missing output")]
#[test_case("PASS: b\nPASS: a\n", &["PASS: a", "PASS: b"], TestLogExitCode::TEST_OUTPUT_MISMATCH ; "order matters")]
#[test_case(
    "PASS: a\nPASS: b\n",
    &["PASS: a", "WARNING: field destructors ignored", "", "PASS: b"],
    TestLogExitCode::OK
    ; "noise is dropped before comparing"
)]
fn compare_by_line(expected: &str, lines: &[&str], expected_code: i32) {
    let files = TempFiles::new();
    let expected = files.write("expected.txt", expected);

    let output = testlog()
        .args(["--compare-with", expected.as_str(), "--compare-by", "line"])
        .arg(fake_test().as_str())
        .args(lines.iter().copied())
        .unchecked(true)
        .output();
    assert_exit_code(&output, expected_code);
}

#[test]
fn compare_by_line_report() {
    let files = TempFiles::new();
    let expected = files.write("expected.txt", "PASS: a\nPASS: b\n");

    let output = testlog()
        .args(["--compare-with", expected.as_str(), "--compare-by", "line"])
        .args([fake_test().as_str(), "FAIL: a"])
        .unchecked(true)
        .output();
    assert_exit_code(&output, TestLogExitCode::TEST_OUTPUT_MISMATCH);
    assert_eq!(
        output.stderr_as_str(),
        format!(
            "2 mismatches (compared by line, 2 checked):\n  \
             line 1: expected `PASS: a`, found `FAIL: a`\n  \
             line 2: expected `PASS: b`, found end of output\n\
             error: test output did not match `{expected}` (compared by line)\n"
        )
    );
}

#[test_case("PASS: a\nPASS: b\n", &["PASS: b", "PASS: a"] ; "order does not matter")]
#[test_case("PASS: a\n", &["PASS: first run: a"] ; "name follows the last colon")]
#[test_case("PASS: a\n\n  \n", &["PASS: a"] ; "blank expected lines are skipped")]
#[test_case("PASS: a\n", &["FAIL: early: a", "PASS: retry: a"] ; "last status wins")]
#[test_case("PASS: a\nSKIP: b\n", &["PASS: a", "SKIP: b"] ; "any status can be expected")]
fn compare_by_name_passes(expected: &str, lines: &[&str]) {
    let files = TempFiles::new();
    let expected = files.write("expected.txt", expected);

    // Name is the default.
    let output = testlog()
        .args(["--compare-with", expected.as_str()])
        .arg(fake_test().as_str())
        .args(lines.iter().copied())
        .output();
    assert_exit_code(&output, TestLogExitCode::OK);
}

#[test_case("PASS: a\nPASS: b\n", &["PASS: a"] ; "missing name")]
#[test_case("PASS: a\n", &["PASS: a", "PASS: b"] ; "unexpected name")]
#[test_case("PASS: a\n", &["FAIL: a"] ; "status differs")]
#[test_case("PASS: a\n", &["PASS: x: b"] ; "name differs")]
fn compare_by_name_fails(expected: &str, lines: &[&str]) {
    let files = TempFiles::new();
    let expected = files.write("expected.txt", expected);

    let output = testlog()
        .args(["--compare-with", expected.as_str(), "--compare-by", "name"])
        .arg(fake_test().as_str())
        .args(lines.iter().copied())
        .unchecked(true)
        .output();
    assert_exit_code(&output, TestLogExitCode::TEST_OUTPUT_MISMATCH);
}

#[test]
fn compare_by_name_report() {
    let files = TempFiles::new();
    let expected = files.write("expected.txt", "PASS: a\nPASS: b\n");

    let output = testlog()
        .args(["--compare-with", expected.as_str()])
        .args([fake_test().as_str(), "FAIL: x: a", "PASS: c"])
        .unchecked(true)
        .output();
    assert_exit_code(&output, TestLogExitCode::TEST_OUTPUT_MISMATCH);
    assert_eq!(
        output.stderr_as_str(),
        format!(
            "3 mismatches (compared by name, 3 checked):\n  \
             a: expected PASS, found FAIL\n  \
             b: missing from output (expected PASS)\n  \
             c: not expected (reported PASS)\n\
             error: test output did not match `{expected}` (compared by name)\n"
        )
    );
}

#[test]
fn arguments_are_forwarded() {
    let files = TempFiles::new();
    let expected = files.write("expected.txt", "--compare-by\nname\n-v\nPASS: a\n");

    // Everything after the test program belongs to it, including options testlog knows, and the
    // test's own exit code doesn't matter.
    let output = testlog()
        .args(["--compare-with", expected.as_str(), "--compare-by", "line"])
        .args([
            fake_test().as_str(),
            "--compare-by",
            "name",
            "-v",
            "--exit-code",
            "3",
            "PASS: a",
        ])
        .output();
    assert_exit_code(&output, TestLogExitCode::OK);
}

#[test]
fn test_exit_code_is_ignored() {
    let output = testlog()
        .args([fake_test().as_str(), "--exit-code", "42", "PASS: a"])
        .output();
    assert_exit_code(&output, TestLogExitCode::OK);
    // Only reported with --verbose.
    assert_eq!(output.stderr_as_str(), "");

    let output = testlog()
        .args([fake_test().as_str(), "--exit-code", "0", "FAIL: a"])
        .unchecked(true)
        .output();
    assert_exit_code(&output, TestLogExitCode::TEST_OUTPUT_MISMATCH);
}

#[test]
fn test_stderr_is_inherited() {
    let output = testlog()
        .args([fake_test().as_str(), "--stderr", "FAIL: to stderr", "PASS: a"])
        .output();
    assert_exit_code(&output, TestLogExitCode::OK);
    assert_eq!(output.stderr_as_str(), "FAIL: to stderr\n");
}

#[test]
fn runs_are_repeatable() {
    let files = TempFiles::new();
    let expected = files.write("expected.txt", "PASS: a\nPASS: b\n");

    let mut cli = testlog();
    cli.args(["--compare-with", expected.as_str()])
        .args([fake_test().as_str(), "PASS: a", "FAIL: b"])
        .unchecked(true);

    let first = cli.output();
    let second = cli.output();
    assert_exit_code(&first, TestLogExitCode::TEST_OUTPUT_MISMATCH);
    assert_exit_code(&second, TestLogExitCode::TEST_OUTPUT_MISMATCH);
    assert_eq!(first.stderr_as_str(), second.stderr_as_str());
}

#[test]
fn missing_test_executable() {
    let files = TempFiles::new();
    let missing = files.path().join("no-such-test");

    let output = testlog()
        .args([missing.as_str(), "PASS: a"])
        .unchecked(true)
        .output();
    assert_exit_code(&output, TestLogExitCode::SETUP_ERROR);
    let stderr = output.stderr_as_str();
    assert!(
        stderr.starts_with(&format!(
            "error: test executable `{missing}` could not be opened\n"
        )),
        "unexpected stderr: {stderr}"
    );
    assert!(stderr.contains("Caused by:"), "unexpected stderr: {stderr}");
}

#[test]
fn directory_as_test_executable() {
    let files = TempFiles::new();

    let output = testlog()
        .args([files.path().as_str(), "PASS: a"])
        .unchecked(true)
        .output();
    assert_exit_code(&output, TestLogExitCode::SETUP_ERROR);
    let stderr = output.stderr_as_str();
    assert!(
        stderr.starts_with(&format!(
            "error: test executable `{}` could not be opened\n",
            files.path()
        )),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn missing_expectation_file() {
    let files = TempFiles::new();
    let missing = files.path().join("missing.txt");

    let output = testlog()
        .args(["--compare-with", missing.as_str()])
        .args([fake_test().as_str(), "PASS: a"])
        .unchecked(true)
        .output();
    assert_exit_code(&output, TestLogExitCode::SETUP_ERROR);
    let stderr = output.stderr_as_str();
    assert!(
        stderr.starts_with(&format!(
            "error: argument --compare-with specified file `{missing}` that couldn't be read\n"
        )),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn compare_by_without_compare_with() {
    let output = testlog()
        .args(["--compare-by", "line", fake_test().as_str(), "PASS: a"])
        .output();
    assert_exit_code(&output, TestLogExitCode::OK);
    assert_eq!(
        output.stderr_as_str(),
        "warning: --compare-by has no effect without --compare-with\n"
    );
}

#[test]
fn verbose() {
    let output = testlog()
        .args(["--verbose", fake_test().as_str(), "--exit-code", "5", "PASS: a"])
        .output();
    assert_exit_code(&output, TestLogExitCode::OK);
    let stderr = output.stderr_as_str();
    assert!(
        stderr.contains("info: running `") && stderr.contains("(comparing fail markers)"),
        "unexpected stderr: {stderr}"
    );
    assert!(
        stderr.contains("info: test exited with exit status: 5"),
        "unexpected stderr: {stderr}"
    );

    let output = testlog()
        .args([fake_test().as_str(), "PASS: a"])
        .env("TESTLOG_VERBOSE", "true")
        .output();
    assert!(
        output.stderr_as_str().contains("info: running `"),
        "TESTLOG_VERBOSE enables verbose output:\n\n{output}"
    );
}

#[test_case(&[] ; "no arguments")]
#[test_case(&["--compare-with", "expected.txt"] ; "no test program")]
#[test_case(&["--compare-by", "size", "fake-test"] ; "unknown compare mode")]
fn usage_errors(args: &[&str]) {
    let output = testlog().args(args.iter().copied()).unchecked(true).output();
    assert_eq!(output.exit_code(), Some(2), "unexpected exit code:\n\n{output}");
}

#[cfg(unix)]
#[test]
fn capture_file_is_removed() {
    let tmpdir = TempFiles::new();

    for line in ["PASS: a", "FAIL: a"] {
        let output = testlog()
            .args([fake_test().as_str(), line])
            .env("TMPDIR", tmpdir.path().as_str())
            .unchecked(true)
            .output();
        assert!(output.exit_code().is_some(), "testlog exited:\n\n{output}");

        let leftover: Vec<_> = std::fs::read_dir(tmpdir.path())
            .expect("read temp dir")
            .collect();
        assert!(leftover.is_empty(), "temp files left behind: {leftover:?}");
    }
}

#[cfg(unix)]
#[test]
fn bare_name_runs_from_current_dir() {
    let bin_dir = fake_test().parent().expect("fake-test has a parent dir");
    let name = fake_test().file_name().expect("fake-test has a file name");

    let output = testlog()
        .args([name, "FAIL: a"])
        .current_dir(bin_dir)
        .unchecked(true)
        .output();
    assert_exit_code(&output, TestLogExitCode::TEST_OUTPUT_MISMATCH);
}
