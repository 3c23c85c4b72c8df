//! Default values for gotip.
//!
//! This module provides centralized constants and default locations used
//! across the library and the binary, so the upstream coordinates live in
//! exactly one place.

use std::path::PathBuf;

/// Canonical upstream source repository.
pub const UPSTREAM_URL: &str = "https://go.googlesource.com/go";

/// Branch fetched when no target is given.
pub const DEFAULT_BRANCH: &str = "master";

/// Name of the remote created by the initial clone.
pub const REMOTE: &str = "origin";

/// Prefix of the code review URL for a change number.
pub const REVIEW_URL_PREFIX: &str = "golang.org/cl/";

/// Environment variable overriding the root directory.
pub const ROOT_ENV: &str = "GOTIP_ROOT";

/// Environment variable overriding the upstream URL.
pub const UPSTREAM_ENV: &str = "GOTIP_UPSTREAM";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "GOTIP_LOG";

/// Returns the default root directory for the development tree.
///
/// This is `~/sdk/gotip`, next to the other downloaded Go versions.
/// Falls back to `.gotip` in the current directory if the home directory
/// cannot be determined.
pub fn default_root() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join("sdk").join("gotip"))
        .unwrap_or_else(|| PathBuf::from(".gotip"))
}
