// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runs a test program that logs `STATUS: message[: name]` lines and checks what it printed.
//!
//! The `testlog` binary is the supported interface. This library exists so that the binary can be
//! reused by integration tests.

#![warn(missing_docs)]

mod dispatch;
mod errors;
mod output;

#[doc(hidden)]
pub use dispatch::*;
#[doc(hidden)]
pub use errors::*;
#[doc(hidden)]
pub use output::OutputWriter;
