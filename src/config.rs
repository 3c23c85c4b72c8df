//! Process-wide configuration.
//!
//! A [`Config`] is assembled once at start-up, from command line flags and
//! environment with [`crate::defaults`] as fallback, and then passed by
//! reference to the installer and the runner. Nothing else in the library
//! reads the environment for settings.

use std::env;
use std::path::PathBuf;

use crate::build::Platform;
use crate::defaults;

/// Settings shared by every gotip operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Working copy of the development tree; the built toolchain lives here.
    pub root: PathBuf,
    /// Repository cloned when the working copy is absent.
    pub upstream: String,
    /// Branch fetched when no target is given.
    pub default_branch: String,
    /// Platform family used to pick the build script.
    pub platform: Platform,
}

impl Config {
    /// Builds a configuration from explicit overrides, falling back to the
    /// environment and then to the defaults.
    ///
    /// A relative root is made absolute against the current directory, so
    /// every subprocess and `GOROOT` see the same location.
    pub fn resolve(root: Option<PathBuf>, upstream: Option<String>) -> Self {
        let root = root
            .or_else(|| env::var_os(defaults::ROOT_ENV).map(PathBuf::from))
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(defaults::default_root);
        let root = std::path::absolute(&root).unwrap_or(root);
        let upstream = upstream
            .or_else(|| env::var(defaults::UPSTREAM_ENV).ok())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| defaults::UPSTREAM_URL.to_string());

        Self {
            root,
            upstream,
            ..Self::default()
        }
    }

    /// Configuration rooted at `root` with every other setting defaulted.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: defaults::default_root(),
            upstream: defaults::UPSTREAM_URL.to_string(),
            default_branch: defaults::DEFAULT_BRANCH.to_string(),
            platform: Platform::host(),
        }
    }
}
