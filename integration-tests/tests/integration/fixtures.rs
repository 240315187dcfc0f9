// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use integration_tests::testlog_cli::TestLogCli;

pub fn testlog() -> TestLogCli {
    TestLogCli::new(env!("CARGO_BIN_EXE_testlog-dup"))
}

pub fn fake_test() -> &'static Utf8Path {
    Utf8Path::new(env!("CARGO_BIN_EXE_fake-test"))
}

/// A temporary directory holding expected output files.
pub struct TempFiles {
    dir: Utf8TempDir,
}

impl TempFiles {
    pub fn new() -> Self {
        Self {
            dir: camino_tempfile::tempdir().expect("temp dir created"),
        }
    }

    pub fn path(&self) -> &Utf8Path {
        self.dir.path()
    }

    #[track_caller]
    pub fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("wrote file");
        path
    }
}

#[track_caller]
pub fn assert_exit_code(output: &integration_tests::testlog_cli::TestLogOutput, expected: i32) {
    assert_eq!(
        output.exit_code(),
        Some(expected),
        "unexpected exit code:\n\n{output}"
    );
    assert_eq!(output.stdout_as_str(), "", "testlog never writes to stdout");
}
