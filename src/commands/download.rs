//! Download command implementation
//!
//! Fetches the requested tree into the root directory and rebuilds the
//! toolchain:
//! 1. Clone the upstream repository if the root has none
//! 2. Resolve the target and fetch exactly that reference
//! 3. Detach HEAD at the fetched revision
//! 4. Clean untracked (interactively) and ignored (silently) files
//! 5. Run the platform build script

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use log::{debug, info};

use gotip::config::Config;
use gotip::defaults;
use gotip::install::Installer;

/// Arguments for the download command
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// CL number or branch name; omit to update to the latest tree
    #[arg(value_name = "CL number | branch name")]
    pub target: Option<String>,

    /// Directory holding the development tree
    #[arg(long, value_name = "DIR", env = defaults::ROOT_ENV)]
    pub root: Option<PathBuf>,

    /// Repository to clone when the root is empty
    #[arg(long, value_name = "URL", env = defaults::UPSTREAM_ENV, hide = true)]
    pub upstream: Option<String>,
}

/// Execute the download command
pub fn execute(args: DownloadArgs) -> Result<ExitCode> {
    let config = Config::resolve(args.root, args.upstream);
    let installer = Installer::new(&config);

    let report = installer.install(args.target.as_deref().unwrap_or_default())?;
    debug!("Built {}", report.binary.display());

    info!("Success. You may now run 'gotip'!");
    Ok(ExitCode::SUCCESS)
}
