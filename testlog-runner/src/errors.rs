// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors produced by testlog.

use crate::compare::CompareBy;
use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;

/// The test executable could not be opened for reading.
#[derive(Debug, Error)]
#[error("test executable `{path}` could not be opened")]
pub struct TestExecutableError {
    path: Utf8PathBuf,
    #[source]
    err: std::io::Error,
}

impl TestExecutableError {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self {
            path: path.into(),
            err,
        }
    }

    /// Returns the path to the test executable.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// The file with expected output could not be read.
#[derive(Debug, Error)]
#[error("expected output file `{path}` could not be read")]
pub struct ExpectationReadError {
    path: Utf8PathBuf,
    #[source]
    err: std::io::Error,
}

impl ExpectationReadError {
    pub(crate) fn new(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self {
            path: path.into(),
            err,
        }
    }

    /// Returns the path to the expected output file.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// An error that occurred while turning a [`ComparatorConfig`](crate::config::ComparatorConfig)
/// into a [`Comparator`](crate::runner::Comparator).
#[derive(Debug, Error)]
pub enum ComparatorBuildError {
    /// The test executable could not be opened.
    #[error(transparent)]
    TestExecutable(#[from] TestExecutableError),

    /// The expected output could not be read.
    #[error(transparent)]
    Expectation(#[from] ExpectationReadError),
}

/// An error that occurred while running the test executable.
#[derive(Debug, Error)]
pub enum RunTestError {
    /// The temporary file used to capture standard output could not be created.
    #[error("failed to create temporary file for test output")]
    CaptureFileCreate {
        /// The underlying error.
        #[source]
        err: std::io::Error,
    },

    /// The test executable could not be spawned or waited on.
    #[error("failed to execute `{command}`")]
    Exec {
        /// The command line that was executed.
        command: String,
        /// The underlying error.
        #[source]
        err: std::io::Error,
    },

    /// The captured output could not be read back.
    #[error("failed to read captured output of `{command}`")]
    CaptureRead {
        /// The command line that was executed.
        command: String,
        /// The underlying error.
        #[source]
        err: std::io::Error,
    },
}

/// Error returned while parsing a [`CompareBy`] value from a string.
#[derive(Clone, Debug, Error)]
#[error(
    "unrecognized value for compare-by: {input}\n(known values: {})",
    CompareBy::variants().join(", "),
)]
pub struct CompareByParseError {
    input: String,
}

impl CompareByParseError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}
