//! Shared test utilities for integration and E2E tests.
//!
//! This module provides a throwaway upstream repository shaped like the Go
//! source tree, so `gotip download` can clone, fetch and build against a
//! `file://` URL without network access.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let upstream = Upstream::new();
//!     upstream.publish_change(227037, 1);
//!     // ... run gotip with GOTIP_UPSTREAM=upstream.url()
//! }
//! ```

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_fs::TempDir;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{gotip, Upstream};
}

/// Build script that installs a stub `bin/go` echoing the tree's VERSION
/// followed by its arguments.
pub const STUB_MAKE_BASH: &str = r#"#!/bin/sh
set -e
version=$(cat ../VERSION)
mkdir -p ../bin
printf '#!/bin/sh\necho "%s $*"\n' "$version" > ../bin/go
chmod +x ../bin/go
echo "Installed stub toolchain $version"
"#;

/// A `gotip` command with its root and upstream pointed at test locations.
pub fn gotip(root: &Path, upstream: &str) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("gotip");
    cmd.env("GOTIP_ROOT", root)
        .env("GOTIP_UPSTREAM", upstream)
        .env_remove("GOTIP_LOG");
    cmd
}

/// A local upstream repository with a master branch and a stub build.
pub struct Upstream {
    temp: TempDir,
    path: PathBuf,
}

impl Upstream {
    /// Creates the repository with the stub build script.
    pub fn new() -> Self {
        Self::with_make_script(STUB_MAKE_BASH)
    }

    /// Creates the repository with a custom `src/make.bash`.
    pub fn with_make_script(script: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("go");
        fs::create_dir_all(path.join("src")).unwrap();

        let upstream = Self { temp, path };
        upstream.git(&["init", "-q"]);
        upstream.git(&["symbolic-ref", "HEAD", "refs/heads/master"]);

        fs::write(upstream.path.join(".gitignore"), "/bin/\n").unwrap();
        fs::write(upstream.path.join("VERSION"), "master-1\n").unwrap();
        write_executable(&upstream.path.join("src").join("make.bash"), script);
        upstream.commit("initial");
        upstream
    }

    /// `file://` URL of the repository.
    pub fn url(&self) -> String {
        format!("file://{}", self.path.display())
    }

    /// Directory next to the repository, handy as a gotip root.
    pub fn scratch(&self, name: &str) -> PathBuf {
        self.temp.path().join(name)
    }

    /// Publishes patch set `patch_set` of `change` under `refs/changes`.
    ///
    /// The patch set's VERSION reads `cl-<change>-<patch set>`.
    pub fn publish_change(&self, change: u64, patch_set: u64) {
        let version = format!("cl-{}-{}", change, patch_set);
        let ref_path = format!("refs/changes/{:02}/{}/{}", change % 100, change, patch_set);
        self.publish(&version, &ref_path);
    }

    /// Creates branch `name` whose VERSION reads `branch-<name>`.
    pub fn add_branch(&self, name: &str) {
        let version = format!("branch-{}", name);
        self.publish(&version, &format!("refs/heads/{}", name));
    }

    /// Advances master with a new VERSION.
    pub fn advance_master(&self, version: &str) {
        fs::write(self.path.join("VERSION"), format!("{}\n", version)).unwrap();
        self.commit(version);
    }

    fn publish(&self, version: &str, ref_path: &str) {
        self.git(&["checkout", "-q", "--detach", "master"]);
        fs::write(self.path.join("VERSION"), format!("{}\n", version)).unwrap();
        self.commit(version);
        self.git(&["update-ref", ref_path, "HEAD"]);
        self.git(&["checkout", "-q", "master"]);
    }

    fn commit(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&[
            "-c",
            "user.name=Gopher",
            "-c",
            "user.email=gopher@example.com",
            "commit",
            "-q",
            "-m",
            message,
        ]);
    }

    fn git(&self, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(&self.path)
            .status()
            .expect("failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }
}

/// Writes `content` to `path` and marks it executable.
pub fn write_executable(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}
