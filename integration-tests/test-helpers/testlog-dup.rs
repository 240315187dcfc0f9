// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! This is a duplicate of testlog's main.rs, so integration tests never rebuild the binary that
//! is currently running them. See tests/integration/main.rs for more.

use color_eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = enable_ansi_support::enable_ansi_support();

    testlog_cli::main_impl()
}
