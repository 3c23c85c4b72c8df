//! Scoped subprocess invocation.
//!
//! Every external step gotip takes (git, the build script, the bootstrap
//! query) goes through one of two helpers:
//!
//! - [`stream`] connects the child to our own standard streams, so progress
//!   output and interactive prompts reach the user live. It blocks until the
//!   child exits and reports the exit status.
//! - [`capture`] collects standard output for parsing. Standard error is
//!   captured too and folded into the failure message.
//!
//! On success both return an [`Outcome`] carrying the exit status and, for
//! [`capture`], the collected output. On failure they return a plain
//! `String` describing it; callers wrap that in the
//! [`Error`](crate::error::Error) variant naming their step.

use std::process::{Command, ExitStatus, Stdio};

use log::debug;

/// Result of a command that exited successfully.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: ExitStatus,
    /// Collected standard output; empty when the stream was inherited.
    pub stdout: String,
}

/// Formats a command line for debug logging.
pub fn describe(cmd: &Command) -> String {
    let mut line = cmd.get_program().to_string_lossy().into_owned();
    for arg in cmd.get_args() {
        line.push(' ');
        line.push_str(&arg.to_string_lossy());
    }
    line
}

/// Runs `cmd` with inherited standard streams and waits for it.
pub fn stream(cmd: &mut Command) -> Result<Outcome, String> {
    debug!("Running {}", describe(cmd));

    let status = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| e.to_string())?;

    check_status(status)?;
    Ok(Outcome {
        status,
        stdout: String::new(),
    })
}

/// Runs `cmd` with its standard output collected.
pub fn capture(cmd: &mut Command) -> Result<Outcome, String> {
    debug!("Running {}", describe(cmd));

    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| e.to_string())?;

    if let Err(status) = check_status(output.status) {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(if stderr.trim().is_empty() {
            status
        } else {
            format!("{}\n{}", status, stderr.trim_end())
        });
    }

    Ok(Outcome {
        status: output.status,
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
    })
}

fn check_status(status: ExitStatus) -> Result<(), String> {
    if status.success() {
        Ok(())
    } else {
        Err(status.to_string())
    }
}
