//! CLI argument parsing and command dispatch
//!
//! Only `download` is a gotip command. Every other invocation belongs to the
//! built go command, so its arguments are forwarded untouched rather than
//! parsed.

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use gotip::defaults;
use gotip::error::Error;

use crate::commands;

const DOWNLOAD: &str = "download";

/// gotip - Build and run the Go toolchain from the development tree
#[derive(Parser, Debug)]
#[command(name = "gotip")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch and build the latest tree, a branch, or a pending change
    Download(commands::download::DownloadArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<ExitCode> {
        match self.command {
            Commands::Download(args) => commands::download::execute(args),
        }
    }
}

/// Dispatches the raw process arguments (without the program name).
pub fn run(args: Vec<OsString>) -> Result<ExitCode> {
    if !matches!(args.first(), Some(arg) if arg == DOWNLOAD) {
        return commands::run::execute(args);
    }

    let argv = std::iter::once(OsString::from("gotip")).chain(args);
    match Cli::try_parse_from(argv) {
        Ok(cli) => cli.execute(),
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.print()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            log::debug!("{}", err);
            Err(Error::Usage {
                message: "gotip download [CL number | branch name]".to_string(),
            }
            .into())
        }
    }
}

/// Sets up `env_logger` with bare messages on standard error.
///
/// The filter comes from `GOTIP_LOG` and defaults to `info`.
pub fn init_logging() {
    let env = env_logger::Env::default().filter_or(defaults::LOG_ENV, "info");
    env_logger::Builder::from_env(env)
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .target(env_logger::Target::Stderr)
        .init();
}
