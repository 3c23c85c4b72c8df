//! The built toolchain.
//!
//! A successful build leaves the `go` command at `<root>/bin/go` (plus the
//! host executable suffix). Its presence is what tells gotip the development
//! tree has been installed at least once.
//!
//! Every invocation other than `gotip download` is forwarded to that binary
//! with `GOROOT` pointing at the root and `<root>/bin` first on `PATH`, so
//! tools the go command spawns resolve to the same tree.

use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use log::debug;

use crate::error::{Error, Result};

/// Path of the go command inside `root`.
pub fn binary_path(root: &Path) -> PathBuf {
    root.join("bin").join(format!("go{}", env::consts::EXE_SUFFIX))
}

/// Whether a toolchain has been built into `root`.
pub fn is_installed(root: &Path) -> bool {
    binary_path(root).is_file()
}

/// Returns the search path `existing` with `<root>/bin` in front.
pub fn prepend_path(root: &Path, existing: Option<&OsStr>) -> Result<OsString> {
    let mut dirs = vec![root.join("bin")];
    if let Some(existing) = existing {
        dirs.extend(env::split_paths(existing));
    }
    env::join_paths(dirs).map_err(|e| Error::Run {
        binary: binary_path(root),
        message: e.to_string(),
    })
}

/// Builds the command that runs the go command from `root` with `args`.
pub fn command<I, S>(root: &Path, args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let binary = binary_path(root);
    let path = prepend_path(root, env::var_os("PATH").as_deref())?;

    let mut cmd = Command::new(&binary);
    cmd.args(args).env("GOROOT", root).env("PATH", path);
    Ok(cmd)
}

/// Runs the installed go command, forwarding `args` and the exit status.
///
/// On Unix the current process is replaced, so this only returns on error.
pub fn run(root: &Path, args: &[OsString]) -> Result<ExitCode> {
    if !is_installed(root) {
        return Err(Error::NotInstalled {
            root: root.to_path_buf(),
        });
    }

    let mut cmd = command(root, args)?;
    debug!("Running {}", crate::process::describe(&cmd));
    delegate(&mut cmd, binary_path(root))
}

#[cfg(unix)]
fn delegate(cmd: &mut Command, binary: PathBuf) -> Result<ExitCode> {
    use std::os::unix::process::CommandExt;

    let err = cmd.exec();
    Err(Error::Run {
        binary,
        message: err.to_string(),
    })
}

#[cfg(not(unix))]
fn delegate(cmd: &mut Command, binary: PathBuf) -> Result<ExitCode> {
    let status = cmd.status().map_err(|e| Error::Run {
        binary,
        message: e.to_string(),
    })?;

    let code = status.code().unwrap_or(1);
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}
