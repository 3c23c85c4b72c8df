//! # gotip CLI
//!
//! This is the binary entry point for the `gotip` command-line tool.
//!
//! Its primary responsibilities are:
//! - Telling `gotip download` apart from invocations meant for the built
//!   go command.
//! - Setting up logging.
//! - Turning any error into a single `gotip: <message>` line on standard
//!   error and a failing exit status.
//!
//! The core application logic is defined in the `lib.rs` library crate, ensuring
//! that the binary is a thin wrapper around the reusable library functionality.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    cli::init_logging();

    match cli::run(env::args_os().skip(1).collect()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("gotip: {}", err);
            ExitCode::FAILURE
        }
    }
}
