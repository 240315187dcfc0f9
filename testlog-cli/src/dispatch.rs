// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    ExpectedError,
    errors::Result,
    output::{OutputContext, OutputOpts, OutputWriter, clap_styles},
};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use std::io::Write;
use supports_color::Stream;
use testlog_runner::{
    compare::CompareBy, config::ComparatorConfig, exit_codes::TestLogExitCode,
    reporter::MismatchReporter,
};
use tracing::{debug, info, warn};

/// Run a test program and check the results it logs.
///
/// The test prints one result per line, in the form `STATUS: message[: name]`. Without
/// --compare-with, testlog fails if any result has the status FAIL.
#[derive(Debug, Parser)]
#[command(version, styles = clap_styles::style(), max_term_width = 100)]
pub struct TestLogApp {
    #[clap(flatten)]
    output: OutputOpts,

    /// File with the expected output
    #[arg(long, value_name = "FILE")]
    compare_with: Option<Utf8PathBuf>,

    /// How to compare against --compare-with [default: name]
    #[arg(long, value_enum, value_name = "MODE")]
    compare_by: Option<CompareByOpt>,

    /// Ignore output lines containing TEXT (can be repeated)
    #[arg(long = "ignore-line", value_name = "TEXT")]
    ignore_lines: Vec<String>,

    /// Test executable, followed by arguments passed to it unchanged
    #[arg(
        value_name = "TEST",
        required = true,
        num_args = 1..,
        trailing_var_arg = true
    )]
    command: Vec<String>,
}

impl TestLogApp {
    /// Initializes the output context.
    pub fn init_output(&self) -> OutputContext {
        self.output.init()
    }

    /// Executes the app, returning the exit code on success.
    pub fn exec(self, output: OutputContext, output_writer: &mut OutputWriter) -> Result<i32> {
        let Some((test, args)) = self.command.split_first() else {
            unreachable!("clap requires at least one value for TEST")
        };

        if self.compare_by.is_some() && self.compare_with.is_none() {
            warn!("--compare-by has no effect without --compare-with");
        }

        let config = ComparatorConfig {
            test: Utf8PathBuf::from(test),
            args: args.to_vec(),
            compare_with: self.compare_with,
            compare_by: self.compare_by.map(CompareBy::from).unwrap_or_default(),
            ignore_lines: self.ignore_lines,
        };
        let compare_with = config.compare_with.clone();
        let comparator = config.build()?;

        if output.verbose {
            info!(
                "running `{}` (comparing {})",
                comparator.command().command_line(),
                comparator.mode().kind(),
            );
        } else {
            debug!("running `{}`", comparator.command().command_line());
        }

        let run = comparator.run()?;

        let exit_status = run.captured.exit_status;
        if !exit_status.success() && output.verbose {
            info!("test exited with {exit_status}");
        } else {
            debug!("test exited with {exit_status}");
        }

        let outcome = &run.outcome;
        if outcome.is_success() {
            debug!(
                "{} results checked (compared by {})",
                outcome.checked(),
                outcome.kind()
            );
            return Ok(TestLogExitCode::OK);
        }

        let mut reporter = MismatchReporter::new();
        if output.color.should_colorize(Stream::Stderr) {
            reporter.colorize();
        }
        let mut writer = output_writer.stderr_writer();
        reporter
            .write_outcome(outcome, &mut writer)
            .and_then(|()| writer.flush())
            .map_err(ExpectedError::write_output_error)?;

        Err(ExpectedError::test_output_mismatch(
            outcome.kind(),
            outcome.mismatches().len(),
            compare_with,
        ))
    }
}

/// How to compare the test's output against the expected output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum CompareByOpt {
    /// Compare line by line, in order
    Line,
    /// Compare the status reported for each test name, in any order
    Name,
}

impl From<CompareByOpt> for CompareBy {
    fn from(opt: CompareByOpt) -> Self {
        match opt {
            CompareByOpt::Line => CompareBy::Line,
            CompareByOpt::Name => CompareBy::Name,
        }
    }
}

/// Parses the command line, runs testlog and exits the process.
pub fn main_impl() -> ! {
    let app = TestLogApp::parse();
    let output = app.init_output();

    match app.exec(output, &mut OutputWriter::default()) {
        Ok(code) => std::process::exit(code),
        Err(error) => {
            error.display_to_stderr(&output.stderr_styles());
            std::process::exit(error.process_exit_code())
        }
    }
}
