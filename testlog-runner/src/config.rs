// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for a single `testlog` run.

use crate::{
    compare::{CompareBy, CompareMode},
    errors::ComparatorBuildError,
    expected::ExpectationSource,
    log_line::LogFilter,
    runner::{Comparator, TestCommand},
};
use camino::Utf8PathBuf;

/// Everything needed to run a test executable and check its output.
///
/// Every field is always present. A missing expectation file is `None` in
/// [`compare_with`](Self::compare_with), which selects the fail-marker check.
#[derive(Clone, Debug)]
pub struct ComparatorConfig {
    /// Path to the test executable.
    pub test: Utf8PathBuf,

    /// Arguments forwarded verbatim to the test executable.
    pub args: Vec<String>,

    /// File with the expected output.
    pub compare_with: Option<Utf8PathBuf>,

    /// How to compare against [`compare_with`](Self::compare_with).
    pub compare_by: CompareBy,

    /// Extra strings that mark a captured line as noise.
    pub ignore_lines: Vec<String>,
}

impl ComparatorConfig {
    /// Creates a config that runs `test` with no arguments and checks for `FAIL` results.
    pub fn new(test: impl Into<Utf8PathBuf>) -> Self {
        Self {
            test: test.into(),
            args: Vec::new(),
            compare_with: None,
            compare_by: CompareBy::default(),
            ignore_lines: Vec::new(),
        }
    }

    /// Reads the expected output and validates the test executable.
    pub fn build(self) -> Result<Comparator, ComparatorBuildError> {
        let source = self
            .compare_with
            .map(ExpectationSource::from_path)
            .transpose()?;
        let command = TestCommand::new(self.test, self.args)?;

        let mut filter = LogFilter::new();
        for needle in self.ignore_lines {
            filter.ignore(needle);
        }

        Ok(Comparator::new(
            command,
            CompareMode::new(source, self.compare_by),
            filter,
        ))
    }
}
