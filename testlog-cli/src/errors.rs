// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::output::{NO_HEADING_TARGET, StderrStyles};
use camino::Utf8PathBuf;
use owo_colors::OwoColorize;
use std::error::Error;
use testlog_runner::{
    compare::CompareKind,
    errors::{ComparatorBuildError, ExpectationReadError, RunTestError, TestExecutableError},
    exit_codes::TestLogExitCode,
};
use thiserror::Error;
use tracing::error;

pub(crate) type Result<T, E = ExpectedError> = std::result::Result<T, E>;

// Note that the #[error()] strings are mostly placeholder messages -- the expected way to print out
// errors is with the display_to_stderr method, which colorizes errors.

/// An error that testlog knows how to report.
#[derive(Debug, Error)]
#[doc(hidden)]
pub enum ExpectedError {
    #[error("test executable could not be opened")]
    TestExecutableError {
        #[from]
        err: TestExecutableError,
    },
    #[error("expected output could not be read")]
    ExpectationReadError {
        #[from]
        err: ExpectationReadError,
    },
    #[error("failed to run test")]
    RunTestError {
        #[from]
        err: RunTestError,
    },
    #[error("failed to write to stderr")]
    WriteOutputError {
        #[source]
        err: std::io::Error,
    },
    #[error("test output did not match")]
    TestOutputMismatch {
        kind: CompareKind,
        mismatch_count: usize,
        compare_with: Option<Utf8PathBuf>,
    },
}

impl From<ComparatorBuildError> for ExpectedError {
    fn from(err: ComparatorBuildError) -> Self {
        match err {
            ComparatorBuildError::TestExecutable(err) => Self::TestExecutableError { err },
            ComparatorBuildError::Expectation(err) => Self::ExpectationReadError { err },
        }
    }
}

impl ExpectedError {
    pub(crate) fn write_output_error(err: std::io::Error) -> Self {
        Self::WriteOutputError { err }
    }

    pub(crate) fn test_output_mismatch(
        kind: CompareKind,
        mismatch_count: usize,
        compare_with: Option<Utf8PathBuf>,
    ) -> Self {
        Self::TestOutputMismatch {
            kind,
            mismatch_count,
            compare_with,
        }
    }

    /// Returns the exit code for the process.
    pub fn process_exit_code(&self) -> i32 {
        match self {
            Self::TestExecutableError { .. } | Self::ExpectationReadError { .. } => {
                TestLogExitCode::SETUP_ERROR
            }
            Self::RunTestError { err } => match err {
                RunTestError::Exec { .. } => TestLogExitCode::TEST_EXEC_FAILED,
                RunTestError::CaptureFileCreate { .. } | RunTestError::CaptureRead { .. } => {
                    TestLogExitCode::SETUP_ERROR
                }
            },
            Self::WriteOutputError { .. } => TestLogExitCode::WRITE_OUTPUT_ERROR,
            Self::TestOutputMismatch { .. } => TestLogExitCode::TEST_OUTPUT_MISMATCH,
        }
    }

    /// Displays this error to stderr.
    pub fn display_to_stderr(&self, styles: &StderrStyles) {
        let mut next_error = match &self {
            Self::TestExecutableError { err } => {
                error!(
                    "test executable `{}` could not be opened",
                    err.path().style(styles.bold)
                );
                err.source()
            }
            Self::ExpectationReadError { err } => {
                error!(
                    "argument {} specified file `{}` that couldn't be read",
                    "--compare-with".style(styles.bold),
                    err.path().style(styles.bold),
                );
                err.source()
            }
            Self::RunTestError { err } => {
                error!("{err}");
                err.source()
            }
            Self::WriteOutputError { err } => {
                error!("failed to write mismatch details to stderr");
                Some(err as &dyn Error)
            }
            Self::TestOutputMismatch {
                kind,
                mismatch_count,
                compare_with,
            } => {
                match (kind, compare_with) {
                    (CompareKind::FailMarkers, _) => {
                        error!(
                            "test reported {} {}",
                            mismatch_count.style(styles.bold),
                            if *mismatch_count == 1 {
                                "failure"
                            } else {
                                "failures"
                            },
                        );
                    }
                    (kind, Some(path)) => {
                        error!(
                            "test output did not match `{}` (compared by {kind})",
                            path.style(styles.bold),
                        );
                    }
                    (kind, None) => {
                        error!("test output did not match (compared by {kind})");
                    }
                }
                None
            }
        };

        while let Some(err) = next_error {
            error!(target: NO_HEADING_TARGET, "\nCaused by:\n  {}", err);
            next_error = err.source();
        }
    }
}
