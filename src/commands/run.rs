//! Forwarding to the built go command
//!
//! Any invocation that is not `gotip download` runs the toolchain from the
//! development tree with the arguments passed through verbatim. Fails with
//! an instruction to download first if nothing has been built yet.

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::Result;

use gotip::config::Config;
use gotip::toolchain;

/// Execute the forwarded invocation
pub fn execute(args: Vec<OsString>) -> Result<ExitCode> {
    let config = Config::resolve(None, None);
    Ok(toolchain::run(&config.root, &args)?)
}
