// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Policies for checking a [`TestLog`] against expectations.
//!
//! There are three of them:
//!
//! * With no expectations, the log must not contain any `FAIL` results.
//! * By line, the log must equal the expected transcript line for line.
//! * By name, the log must report exactly the expected set of names, each with the expected
//!   status. Order and messages don't matter.

use crate::{
    errors::CompareByParseError,
    exit_codes::TestLogExitCode,
    expected::{ExpectationSource, NamedResults},
    log_line::{NamedResult, TestLog},
};
use itertools::{EitherOrBoth, Itertools};
use std::{fmt, str::FromStr};

/// How expected output is compared against the log.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum CompareBy {
    /// Compare line by line, in order.
    Line,

    /// Compare the set of named results, ignoring order.
    #[default]
    Name,
}

impl CompareBy {
    /// Returns the string representations of all variants.
    pub fn variants() -> [&'static str; 2] {
        ["line", "name"]
    }

    /// Returns the string representation of this variant.
    pub fn as_str(self) -> &'static str {
        match self {
            CompareBy::Line => "line",
            CompareBy::Name => "name",
        }
    }
}

impl fmt::Display for CompareBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompareBy {
    type Err = CompareByParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let val = match s {
            "line" => CompareBy::Line,
            "name" => CompareBy::Name,
            other => return Err(CompareByParseError::new(other)),
        };
        Ok(val)
    }
}

/// The check performed on a test's log.
#[derive(Clone, Debug)]
pub enum CompareMode {
    /// No expected output: fail if any result has the `FAIL` status.
    FailMarkers,

    /// Compare against expected output.
    Expected {
        /// The expected output.
        source: ExpectationSource,
        /// How to compare it.
        compare_by: CompareBy,
    },
}

impl CompareMode {
    /// Picks the mode for an optional expectation source. `compare_by` only matters if `source` is
    /// present.
    pub fn new(source: Option<ExpectationSource>, compare_by: CompareBy) -> Self {
        match source {
            Some(source) => CompareMode::Expected { source, compare_by },
            None => CompareMode::FailMarkers,
        }
    }

    /// Returns the kind of comparison this mode performs.
    pub fn kind(&self) -> CompareKind {
        match self {
            CompareMode::FailMarkers => CompareKind::FailMarkers,
            CompareMode::Expected {
                compare_by: CompareBy::Line,
                ..
            } => CompareKind::Line,
            CompareMode::Expected {
                compare_by: CompareBy::Name,
                ..
            } => CompareKind::Name,
        }
    }

    /// Checks a log.
    pub fn compare(&self, log: &TestLog) -> ComparisonOutcome {
        match self {
            CompareMode::FailMarkers => check_fail_markers(log),
            CompareMode::Expected {
                source,
                compare_by: CompareBy::Line,
            } => compare_by_line(source, log),
            CompareMode::Expected {
                source,
                compare_by: CompareBy::Name,
            } => compare_by_name(source, log),
        }
    }
}

/// The kind of comparison that produced a [`ComparisonOutcome`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CompareKind {
    /// Checked for `FAIL` results.
    FailMarkers,
    /// Compared line by line.
    Line,
    /// Compared by name.
    Name,
}

impl fmt::Display for CompareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareKind::FailMarkers => write!(f, "fail markers"),
            CompareKind::Line => write!(f, "line"),
            CompareKind::Name => write!(f, "name"),
        }
    }
}

/// A single way in which a log failed a check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Mismatch {
    /// A result with the `FAIL` status.
    FailMarker {
        /// The 1-based position of the line in the log.
        line_number: usize,
        /// The line itself.
        line: String,
    },

    /// A position where the expected and actual lines differ.
    ///
    /// `None` on either side means that side had run out of lines.
    Line {
        /// The 1-based position being compared.
        line_number: usize,
        /// The expected line, trimmed.
        expected: Option<String>,
        /// The line in the log.
        actual: Option<String>,
    },

    /// An expected name that the log did not report.
    MissingName {
        /// The name.
        name: String,
        /// The status it was expected to have.
        expected_status: String,
    },

    /// A name in the log that was not expected.
    UnexpectedName {
        /// The name.
        name: String,
        /// The status it was reported with.
        actual_status: String,
    },

    /// A name reported with a different status than expected.
    Status {
        /// The name.
        name: String,
        /// The expected status.
        expected: String,
        /// The reported status.
        actual: String,
    },
}

/// The result of checking a log.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ComparisonOutcome {
    kind: CompareKind,
    checked: usize,
    mismatches: Vec<Mismatch>,
}

impl ComparisonOutcome {
    /// Returns the kind of comparison performed.
    pub fn kind(&self) -> CompareKind {
        self.kind
    }

    /// Returns the number of lines or names that were checked.
    pub fn checked(&self) -> usize {
        self.checked
    }

    /// Returns every mismatch found, in the order it was found.
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    /// Returns true if the check passed.
    pub fn is_success(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Returns the exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            TestLogExitCode::OK
        } else {
            TestLogExitCode::TEST_OUTPUT_MISMATCH
        }
    }
}

/// Fails if any line in the log has the `FAIL` status.
pub fn check_fail_markers(log: &TestLog) -> ComparisonOutcome {
    let mismatches = log
        .fail_markers()
        .map(|(line_number, line)| Mismatch::FailMarker {
            line_number,
            line: line.to_owned(),
        })
        .collect();

    ComparisonOutcome {
        kind: CompareKind::FailMarkers,
        checked: log.len(),
        mismatches,
    }
}

/// Compares the log against the expected transcript line by line.
///
/// The shorter side is padded with empty lines, so a length difference is a mismatch unless the
/// extra expected lines are blank.
pub fn compare_by_line(expected: &ExpectationSource, log: &TestLog) -> ComparisonOutcome {
    let mut checked = 0;
    let mut mismatches = Vec::new();

    for (idx, pair) in expected.lines().iter().zip_longest(log.iter()).enumerate() {
        checked += 1;
        let (expected, actual) = match pair {
            EitherOrBoth::Both(expected, actual) => (Some(expected.trim()), Some(actual)),
            EitherOrBoth::Left(expected) => (Some(expected.trim()), None),
            EitherOrBoth::Right(actual) => (None, Some(actual)),
        };

        if expected.unwrap_or("") != actual.unwrap_or("") {
            mismatches.push(Mismatch::Line {
                line_number: idx + 1,
                expected: expected.map(ToOwned::to_owned),
                actual: actual.map(ToOwned::to_owned),
            });
        }
    }

    ComparisonOutcome {
        kind: CompareKind::Line,
        checked,
        mismatches,
    }
}

/// Compares the log against the expected named results.
///
/// Passes iff both sides report the same set of names and every name has the same status on both
/// sides. Duplicate names resolve to their last status on either side.
pub fn compare_by_name(expected: &ExpectationSource, log: &TestLog) -> ComparisonOutcome {
    let expected = expected.named_results();
    let actual: NamedResults = log.iter().map(NamedResult::parse).collect();

    let mut mismatches = Vec::new();
    for (name, expected_status) in expected.iter() {
        match actual.get(name) {
            Some(actual_status) if actual_status == expected_status => {}
            Some(actual_status) => mismatches.push(Mismatch::Status {
                name: name.to_owned(),
                expected: expected_status.to_owned(),
                actual: actual_status.to_owned(),
            }),
            None => mismatches.push(Mismatch::MissingName {
                name: name.to_owned(),
                expected_status: expected_status.to_owned(),
            }),
        }
    }
    let mut unexpected = 0;
    for (name, actual_status) in actual.iter() {
        if !expected.contains(name) {
            unexpected += 1;
            mismatches.push(Mismatch::UnexpectedName {
                name: name.to_owned(),
                actual_status: actual_status.to_owned(),
            });
        }
    }

    ComparisonOutcome {
        kind: CompareKind::Name,
        // Every name seen on either side.
        checked: expected.len() + unexpected,
        mismatches,
    }
}
