// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::{Utf8Path, Utf8PathBuf};
use std::{
    borrow::Cow,
    collections::HashMap,
    ffi::OsString,
    fmt,
    process::{Command, ExitStatus},
};

/// Environment variables read by testlog. They're cleared so the caller's environment doesn't
/// leak into tests.
const TESTLOG_ENV_VARS: &[&str] = &["TESTLOG_VERBOSE", "TESTLOG_COLOR", "TESTLOG_LOG"];

#[derive(Clone, Debug)]
pub struct TestLogCli {
    bin: Utf8PathBuf,
    args: Vec<String>,
    envs: HashMap<OsString, OsString>,
    current_dir: Option<Utf8PathBuf>,
    unchecked: bool,
}

impl TestLogCli {
    pub fn new(bin: impl Into<Utf8PathBuf>) -> Self {
        Self {
            bin: bin.into(),
            args: Vec::new(),
            envs: HashMap::new(),
            current_dir: None,
            unchecked: false,
        }
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(&mut self, arg: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(arg.into_iter().map(Into::into));
        self
    }

    pub fn env(&mut self, k: impl Into<OsString>, v: impl Into<OsString>) -> &mut Self {
        self.envs.insert(k.into(), v.into());
        self
    }

    pub fn current_dir(&mut self, dir: impl AsRef<Utf8Path>) -> &mut Self {
        self.current_dir = Some(dir.as_ref().to_owned());
        self
    }

    /// Don't panic if testlog exits with a non-zero code.
    pub fn unchecked(&mut self, unchecked: bool) -> &mut Self {
        self.unchecked = unchecked;
        self
    }

    pub fn output(&self) -> TestLogOutput {
        let mut command = Command::new(&self.bin);
        command.args(&self.args);
        for var in TESTLOG_ENV_VARS {
            command.env_remove(var);
        }
        command.env("TESTLOG_COLOR", "never");
        command.envs(&self.envs);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        let output = command.output().expect("failed to execute");

        let ret = TestLogOutput {
            command_line: self.command_line(),
            exit_status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        };

        if !self.unchecked && !output.status.success() {
            panic!("command failed:\n\n{ret}");
        }

        ret
    }

    fn command_line(&self) -> String {
        shell_words::join(
            std::iter::once(self.bin.as_str()).chain(self.args.iter().map(|s| s.as_str())),
        )
    }
}

pub struct TestLogOutput {
    pub command_line: String,
    pub exit_status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl TestLogOutput {
    pub fn exit_code(&self) -> Option<i32> {
        self.exit_status.code()
    }

    pub fn stdout_as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stdout)
    }

    pub fn stderr_as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.stderr)
    }
}

impl fmt::Display for TestLogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "command: {}\nexit code: {:?}\n\
                   --- stdout ---\n{}\n\n--- stderr ---\n{}\n\n",
            self.command_line,
            self.exit_status.code(),
            String::from_utf8_lossy(&self.stdout),
            String::from_utf8_lossy(&self.stderr)
        )
    }
}

// Make Debug output the same as Display output, so `.unwrap()` and `.expect()` are nicer.
impl fmt::Debug for TestLogOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
