//! Building the toolchain from the working copy.
//!
//! The source tree ships one build script per platform family under `src/`.
//! Which one to run depends only on the host operating system:
//!
//! | Platform | Script     |
//! |----------|------------|
//! | Plan 9   | `make.rc`  |
//! | Windows  | `make.bat` |
//! | other    | `make.bash`|
//!
//! `make.bat` cannot find a bootstrap toolchain by itself, so on Windows the
//! installed `go` is asked for its root and that path is passed to the
//! script as `GOROOT_BOOTSTRAP`.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};
use crate::process;

/// Environment variable telling the build script where the bootstrap
/// toolchain lives.
pub const BOOTSTRAP_ENV: &str = "GOROOT_BOOTSTRAP";

/// Host platform family, as far as building is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Unix,
    Windows,
    Plan9,
}

impl Platform {
    /// Maps an `std::env::consts::OS` value to a platform family.
    pub fn from_os(os: &str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "plan9" => Platform::Plan9,
            _ => Platform::Unix,
        }
    }

    /// The platform this binary runs on.
    pub fn host() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// File name of the build script under `<root>/src`.
    pub fn make_script(self) -> &'static str {
        match self {
            Platform::Plan9 => "make.rc",
            Platform::Windows => "make.bat",
            Platform::Unix => "make.bash",
        }
    }

    /// Whether the build script needs `GOROOT_BOOTSTRAP` injected.
    pub fn needs_bootstrap_hint(self) -> bool {
        self == Platform::Windows
    }
}

/// Everything needed to run one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInvocation {
    /// Build script to execute.
    pub script: PathBuf,
    /// Working directory of the script, `<root>/src`.
    pub dir: PathBuf,
    /// Variables added to the inherited environment.
    pub env: Vec<(String, String)>,
}

impl BuildInvocation {
    pub fn new(root: &Path, platform: Platform, bootstrap_root: Option<String>) -> Self {
        let dir = root.join("src");
        let env = bootstrap_root
            .map(|path| vec![(BOOTSTRAP_ENV.to_string(), path)])
            .unwrap_or_default();

        Self {
            script: dir.join(platform.make_script()),
            dir,
            env,
        }
    }
}

/// Trait for build operations - allows mocking in tests
pub trait BuildOperations {
    /// Returns the root directory of the currently installed toolchain.
    fn bootstrap_root(&self) -> Result<String>;

    /// Runs the build script, streaming its output, and waits for it.
    fn build(&self, invocation: &BuildInvocation) -> Result<()>;
}

/// The default implementation of `BuildOperations`, which runs the real
/// build script and asks the `go` on `PATH` for its root.
pub struct SystemBuild;

impl BuildOperations for SystemBuild {
    fn bootstrap_root(&self) -> Result<String> {
        let mut cmd = Command::new("go");
        cmd.args(["env", "GOROOT"]);
        let outcome = process::capture(&mut cmd).map_err(|message| Error::Bootstrap { message })?;
        Ok(outcome.stdout.trim().to_string())
    }

    fn build(&self, invocation: &BuildInvocation) -> Result<()> {
        let mut cmd = Command::new(&invocation.script);
        cmd.current_dir(&invocation.dir);
        for (key, value) in &invocation.env {
            cmd.env(key, value);
        }
        process::stream(&mut cmd)
            .map(drop)
            .map_err(|message| Error::Build { message })
    }
}
