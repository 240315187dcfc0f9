// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Helpers for testlog's integration tests.

pub mod testlog_cli;
