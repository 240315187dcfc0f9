// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

#![warn(missing_docs)]

//! Core functionality for `testlog`, a runner for test programs that report their results as
//! `STATUS: message[: name]` lines on standard output.
//!
//! The basic flow is:
//!
//! 1. Build a [`ComparatorConfig`](config::ComparatorConfig) describing the test executable, its
//!    arguments and what its output should be compared against.
//! 2. Turn it into a [`Comparator`](runner::Comparator), which validates the inputs.
//! 3. Run it. The test's standard output is captured into a temporary file, filtered into a
//!    [`TestLog`](log_line::TestLog), and checked by a [`CompareMode`](compare::CompareMode).

pub mod compare;
pub mod config;
pub mod errors;
pub mod exit_codes;
pub mod expected;
pub mod log_line;
pub mod reporter;
pub mod runner;
