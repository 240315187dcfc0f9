// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A fake test program for exercising testlog.
//!
//! Every argument is printed to stdout on its own line, except for:
//! - `--exit-code N`: exit with status N after printing (default 0)
//! - `--stderr TEXT`: print TEXT to stderr instead
//!
//! Unknown options are printed like any other argument, which makes it easy to check that
//! testlog forwards them unchanged.

use std::{
    env,
    io::{self, Write},
    process::exit,
};

fn main() {
    let mut args = env::args().skip(1);
    let mut exit_code = 0;
    let mut stdout = io::stdout().lock();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--exit-code" => {
                let Some(value) = args.next() else {
                    eprintln!("[fake-test] ERROR: --exit-code requires a value");
                    exit(100);
                };
                exit_code = match value.parse() {
                    Ok(code) => code,
                    Err(err) => {
                        eprintln!("[fake-test] ERROR: invalid exit code `{value}`: {err}");
                        exit(100);
                    }
                };
            }
            "--stderr" => {
                let Some(text) = args.next() else {
                    eprintln!("[fake-test] ERROR: --stderr requires a value");
                    exit(100);
                };
                eprintln!("{text}");
            }
            _ => {
                if let Err(err) = writeln!(stdout, "{arg}") {
                    eprintln!("[fake-test] ERROR: failed to write to stdout: {err}");
                    exit(101);
                }
            }
        }
    }

    if let Err(err) = stdout.flush() {
        eprintln!("[fake-test] ERROR: failed to flush stdout: {err}");
        exit(101);
    }
    exit(exit_code);
}
