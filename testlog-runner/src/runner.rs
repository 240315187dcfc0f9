// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Running a test executable and checking what it printed.

use crate::{
    compare::{CompareMode, ComparisonOutcome},
    errors::{RunTestError, TestExecutableError},
    log_line::{LogFilter, TestLog},
};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use camino_tempfile::NamedUtf8TempFile;
use std::{
    fs::File,
    io::{self, Read, Seek, SeekFrom},
    process::ExitStatus,
};
use tracing::debug;

/// A test executable along with the arguments to pass to it.
#[derive(Clone, Debug)]
pub struct TestCommand {
    program: Utf8PathBuf,
    args: Vec<String>,
}

impl TestCommand {
    /// Creates a new command, checking that the executable is a regular file that can be opened
    /// for reading.
    ///
    /// The file is closed again right away. A bare file name like `my-test` refers to a file in
    /// the current directory, not to a program on `PATH`.
    pub fn new(
        program: impl Into<Utf8PathBuf>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, TestExecutableError> {
        let program = program.into();
        let metadata = File::open(&program)
            .and_then(|file| file.metadata())
            .map_err(|err| TestExecutableError::new(program.clone(), err))?;
        // Directories open fine on Unix.
        if !metadata.is_file() {
            return Err(TestExecutableError::new(
                program,
                io::Error::other("not a regular file"),
            ));
        }

        Ok(Self {
            program: spawn_path(program),
            args: args.into_iter().map(Into::into).collect(),
        })
    }

    /// Returns the path the executable is spawned with.
    pub fn program(&self) -> &Utf8Path {
        &self.program
    }

    /// Returns the arguments forwarded to the executable.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns the command line as a shell-quoted string, for display.
    pub fn command_line(&self) -> String {
        shell_words::join(
            std::iter::once(self.program.as_str()).chain(self.args.iter().map(|s| s.as_str())),
        )
    }

    /// Runs the executable to completion, capturing standard output.
    ///
    /// Standard output goes to a temporary file that is removed before this returns, on success
    /// or failure. Standard error is inherited. The exit status of the executable does not make
    /// this fail.
    pub fn run(&self, filter: &LogFilter) -> Result<CapturedRun, RunTestError> {
        let capture =
            NamedUtf8TempFile::new().map_err(|err| RunTestError::CaptureFileCreate { err })?;
        debug!("capturing output of `{}` to {}", self.command_line(), capture.path());

        let exit_status = self.run_into(capture.as_file())?;

        let mut file = capture.as_file();
        let mut buf = Vec::new();
        file.seek(SeekFrom::Start(0))
            .and_then(|_| file.read_to_end(&mut buf))
            .map_err(|err| RunTestError::CaptureRead {
                command: self.command_line(),
                err,
            })?;

        let log = TestLog::from_output(&String::from_utf8_lossy(&buf), filter);
        debug!(
            "`{}` exited with {}, {} result lines",
            self.command_line(),
            exit_status,
            log.len(),
        );

        Ok(CapturedRun { exit_status, log })
    }

    fn run_into(&self, stdout: &File) -> Result<ExitStatus, RunTestError> {
        let exec_err = |err| RunTestError::Exec {
            command: self.command_line(),
            err,
        };

        let stdout = stdout.try_clone().map_err(exec_err)?;
        let output = duct::cmd(self.program.as_std_path(), &self.args)
            .stdout_file(stdout)
            .unchecked()
            .run()
            .map_err(exec_err)?;
        Ok(output.status)
    }
}

fn spawn_path(program: Utf8PathBuf) -> Utf8PathBuf {
    let mut components = program.components();
    match (components.next(), components.next()) {
        (Some(Utf8Component::Normal(_)), None) => Utf8Path::new(".").join(program),
        _ => program,
    }
}

/// What a test executable printed, after filtering.
#[derive(Clone, Debug)]
pub struct CapturedRun {
    /// The exit status of the executable. It does not affect the comparison.
    pub exit_status: ExitStatus,

    /// The filtered log.
    pub log: TestLog,
}

/// Runs one test executable and checks its log.
#[derive(Clone, Debug)]
pub struct Comparator {
    command: TestCommand,
    mode: CompareMode,
    filter: LogFilter,
}

impl Comparator {
    /// Creates a new comparator.
    pub fn new(command: TestCommand, mode: CompareMode, filter: LogFilter) -> Self {
        Self {
            command,
            mode,
            filter,
        }
    }

    /// Returns the command that will be run.
    pub fn command(&self) -> &TestCommand {
        &self.command
    }

    /// Returns the check that will be performed.
    pub fn mode(&self) -> &CompareMode {
        &self.mode
    }

    /// Runs the test once and checks its log.
    pub fn run(&self) -> Result<ComparatorRun, RunTestError> {
        let captured = self.command.run(&self.filter)?;
        let outcome = self.mode.compare(&captured.log);
        Ok(ComparatorRun { captured, outcome })
    }
}

/// The result of [`Comparator::run`].
#[derive(Clone, Debug)]
pub struct ComparatorRun {
    /// What the test printed.
    pub captured: CapturedRun,

    /// The result of checking it.
    pub outcome: ComparisonOutcome,
}

impl ComparatorRun {
    /// Returns the exit code `testlog` should exit with.
    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }
}
