// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Filtering and parsing of the lines a test program writes to standard output.
//!
//! Test programs report one result per line, in the form `STATUS: message[: name]`. Before any
//! comparison happens, captured output is trimmed, and empty lines and known noise are dropped.
//! What remains is a [`TestLog`].

use std::fmt;

/// A warning printed by some runtimes on shutdown. It is never a test result.
pub const FIELD_DESTRUCTORS_WARNING: &str = "WARNING: field destructors ignored";

/// The status that marks a failed result.
pub const FAIL_STATUS: &str = "FAIL";

/// Decides which captured lines are noise.
///
/// A line is ignored if it contains any of the ignored strings. [`FIELD_DESTRUCTORS_WARNING`] is
/// always ignored.
#[derive(Clone, Debug)]
pub struct LogFilter {
    ignored: Vec<String>,
}

impl LogFilter {
    /// Creates a new filter that only ignores [`FIELD_DESTRUCTORS_WARNING`].
    pub fn new() -> Self {
        Self {
            ignored: vec![FIELD_DESTRUCTORS_WARNING.to_owned()],
        }
    }

    /// Adds a string to ignore. Empty strings are skipped, since they would match every line.
    pub fn ignore(&mut self, needle: impl Into<String>) -> &mut Self {
        let needle = needle.into();
        if !needle.is_empty() && !self.ignored.contains(&needle) {
            self.ignored.push(needle);
        }
        self
    }

    /// Returns the strings this filter ignores.
    pub fn ignored(&self) -> impl Iterator<Item = &str> + '_ {
        self.ignored.iter().map(|s| s.as_str())
    }

    /// Returns true if this (already trimmed) line should be dropped.
    pub fn is_ignored(&self, line: &str) -> bool {
        line.is_empty() || self.ignored.iter().any(|needle| line.contains(needle.as_str()))
    }
}

impl Default for LogFilter {
    fn default() -> Self {
        Self::new()
    }
}

/// The filtered output of a single test run.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TestLog {
    lines: Vec<String>,
}

impl TestLog {
    /// Builds a log out of raw captured output.
    pub fn from_output(output: &str, filter: &LogFilter) -> Self {
        let lines = output
            .lines()
            .map(str::trim)
            .filter(|line| !filter.is_ignored(line))
            .map(ToOwned::to_owned)
            .collect();
        Self { lines }
    }

    /// Builds a log out of lines that have already been filtered.
    pub fn from_lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the lines in this log.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Iterates over the lines in this log.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(|line| line.as_str())
    }

    /// Returns the number of lines in this log.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the log has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates over the lines whose status is [`FAIL_STATUS`], along with their 1-based line
    /// numbers.
    pub fn fail_markers(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.iter()
            .enumerate()
            .filter(|(_, line)| NamedResult::parse(line).is_failure())
            .map(|(idx, line)| (idx + 1, line))
    }
}

/// A single result parsed out of a log line.
///
/// For `STATUS: message: name`, the status is `STATUS` and the name is `name`. For
/// `STATUS: message`, the message doubles as the name. A line without any colon is treated as a
/// bare status with an empty message and name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NamedResult<'a> {
    /// Everything before the first colon, verbatim.
    pub status: &'a str,
    /// The text following the status.
    pub message: &'a str,
    /// The key this result is compared by.
    pub name: &'a str,
}

impl<'a> NamedResult<'a> {
    /// Parses a log line.
    pub fn parse(line: &'a str) -> Self {
        let Some(end_status) = line.find(':') else {
            return Self {
                status: line,
                message: "",
                name: "",
            };
        };
        // rfind must succeed if find did.
        let end_message = line.rfind(':').unwrap_or(end_status);

        let status = &line[..end_status];
        if end_message == end_status {
            let message = line[end_status + 1..].trim();
            Self {
                status,
                message,
                name: message,
            }
        } else {
            Self {
                status,
                message: line[end_status + 1..end_message].trim(),
                name: line[end_message + 1..].trim(),
            }
        }
    }

    /// Returns true if this result's status is [`FAIL_STATUS`].
    pub fn is_failure(&self) -> bool {
        self.status == FAIL_STATUS
    }
}

impl fmt::Display for NamedResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.status)
    }
}
