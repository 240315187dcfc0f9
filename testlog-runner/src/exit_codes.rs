// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exit codes returned by `testlog`.

/// Documented exit codes for `testlog`.
///
/// A comparison failure always exits with code 1. The other non-zero codes mean that the test
/// could not be run or checked at all.
pub enum TestLogExitCode {}

impl TestLogExitCode {
    /// The test output matched expectations (or contained no failures).
    pub const OK: i32 = 0;

    /// The test output did not match expectations, or contained a `FAIL` result.
    pub const TEST_OUTPUT_MISMATCH: i32 = 1;

    /// The test executable or expected output file could not be read, or the capture file could
    /// not be created.
    pub const SETUP_ERROR: i32 = 96;

    /// The test executable could not be spawned.
    pub const TEST_EXEC_FAILED: i32 = 101;

    /// Writing diagnostics to stderr produced an error.
    pub const WRITE_OUTPUT_ERROR: i32 = 110;
}
