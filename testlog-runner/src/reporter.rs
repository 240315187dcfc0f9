// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-readable output for failed comparisons.

use crate::compare::{CompareKind, ComparisonOutcome, Mismatch};
use owo_colors::{OwoColorize, Style};
use std::io::{self, Write};

/// Writes mismatch details, one per line.
#[derive(Debug, Default)]
pub struct MismatchReporter {
    styles: Styles,
}

impl MismatchReporter {
    /// Creates a new reporter that doesn't use colors.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses ANSI colors in output.
    pub fn colorize(&mut self) {
        self.styles.colorize();
    }

    /// Writes a heading followed by every mismatch in the outcome. Writes nothing if the
    /// comparison passed.
    pub fn write_outcome(
        &self,
        outcome: &ComparisonOutcome,
        writer: &mut dyn Write,
    ) -> io::Result<()> {
        let mismatches = outcome.mismatches();
        if mismatches.is_empty() {
            return Ok(());
        }

        let styles = &self.styles;
        match outcome.kind() {
            CompareKind::FailMarkers => writeln!(
                writer,
                "{} of {} {} failed:",
                mismatches.len().style(styles.count),
                outcome.checked().style(styles.count),
                plural(outcome.checked(), "result", "results"),
            )?,
            kind => writeln!(
                writer,
                "{} {} (compared by {}, {} checked):",
                mismatches.len().style(styles.count),
                plural(mismatches.len(), "mismatch", "mismatches"),
                kind.style(styles.bold),
                outcome.checked().style(styles.count),
            )?,
        }

        for mismatch in mismatches {
            write!(writer, "  ")?;
            self.write_mismatch(mismatch, writer)?;
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Writes a single mismatch without a trailing newline.
    pub fn write_mismatch(&self, mismatch: &Mismatch, writer: &mut dyn Write) -> io::Result<()> {
        let styles = &self.styles;
        match mismatch {
            Mismatch::FailMarker { line_number, line } => write!(
                writer,
                "line {}: {}",
                line_number.style(styles.count),
                line.style(styles.fail),
            ),
            Mismatch::Line {
                line_number,
                expected,
                actual,
            } => {
                write!(writer, "line {}: expected ", line_number.style(styles.count))?;
                match expected {
                    Some(line) => write!(writer, "`{}`", line.style(styles.pass))?,
                    None => write!(writer, "end of expected output")?,
                }
                write!(writer, ", found ")?;
                match actual {
                    Some(line) => write!(writer, "`{}`", line.style(styles.fail)),
                    None => write!(writer, "end of output"),
                }
            }
            Mismatch::MissingName {
                name,
                expected_status,
            } => write!(
                writer,
                "{}: missing from output (expected {})",
                name.style(styles.bold),
                expected_status.style(styles.pass),
            ),
            Mismatch::UnexpectedName {
                name,
                actual_status,
            } => write!(
                writer,
                "{}: not expected (reported {})",
                name.style(styles.bold),
                actual_status.style(styles.fail),
            ),
            Mismatch::Status {
                name,
                expected,
                actual,
            } => write!(
                writer,
                "{}: expected {}, found {}",
                name.style(styles.bold),
                expected.style(styles.pass),
                actual.style(styles.fail),
            ),
        }
    }
}

fn plural(count: usize, singular: &'static str, plural: &'static str) -> &'static str {
    if count == 1 { singular } else { plural }
}

#[derive(Debug, Default)]
struct Styles {
    bold: Style,
    count: Style,
    pass: Style,
    fail: Style,
}

impl Styles {
    fn colorize(&mut self) {
        self.bold = Style::new().bold();
        self.count = Style::new().bold();
        self.pass = Style::new().green().bold();
        self.fail = Style::new().red().bold();
    }
}
