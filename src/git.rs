//! Git operations on the working copy.
//!
//! This uses the system git command, which automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Any proxy or authentication configured in ~/.gitconfig
//!
//! The [`GitOperations`] trait is the seam the installer talks to, so tests
//! can replace the real subprocesses with recording mocks.

use std::path::Path;
use std::process::Command;

use crate::defaults::REMOTE;
use crate::error::{Error, Result};
use crate::process;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations {
    /// Shallow-clones `url` into `root`, which must already exist and be
    /// empty.
    fn clone_shallow(&self, url: &str, root: &Path) -> Result<()>;

    /// Returns the raw `git ls-remote` listing of the origin remote.
    fn list_remote(&self, root: &Path) -> Result<String>;

    /// Fetches exactly one reference from the origin remote into
    /// `FETCH_HEAD`.
    fn fetch(&self, root: &Path, refspec: &str) -> Result<()>;

    /// Checks out `FETCH_HEAD` as a detached head.
    ///
    /// Refuses to overwrite local modifications and only warns about
    /// commits left behind.
    fn checkout_detached(&self, root: &Path) -> Result<()>;

    /// Interactively removes untracked, non-ignored files and directories.
    fn clean_untracked_interactive(&self, root: &Path) -> Result<()>;

    /// Silently removes ignored files and directories.
    fn clean_ignored(&self, root: &Path) -> Result<()>;
}

/// The default implementation of `GitOperations`, which runs the system
/// `git` command inside the working copy.
pub struct SystemGit;

impl SystemGit {
    fn git(root: &Path) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(root);
        cmd
    }
}

impl GitOperations for SystemGit {
    fn clone_shallow(&self, url: &str, root: &Path) -> Result<()> {
        let mut cmd = Self::git(root);
        cmd.args(["clone", "--depth=1", url, "."]);
        process::stream(&mut cmd).map(drop).map_err(|message| Error::Clone {
            url: url.to_string(),
            message,
        })
    }

    fn list_remote(&self, root: &Path) -> Result<String> {
        let mut cmd = Self::git(root);
        cmd.args(["ls-remote", REMOTE]);
        process::capture(&mut cmd)
            .map(|outcome| outcome.stdout)
            .map_err(|message| Error::ListRemote { message })
    }

    fn fetch(&self, root: &Path, refspec: &str) -> Result<()> {
        let mut cmd = Self::git(root);
        cmd.args(["fetch", REMOTE, refspec]);
        process::stream(&mut cmd).map(drop).map_err(|message| Error::Fetch {
            r#ref: refspec.to_string(),
            message,
        })
    }

    fn checkout_detached(&self, root: &Path) -> Result<()> {
        let mut cmd = Self::git(root);
        cmd.args(["-c", "advice.detachedHead=false", "checkout", "FETCH_HEAD"]);
        process::stream(&mut cmd).map(drop).map_err(|message| Error::Checkout { message })
    }

    fn clean_untracked_interactive(&self, root: &Path) -> Result<()> {
        let mut cmd = Self::git(root);
        cmd.args(["clean", "-i", "-d"]);
        process::stream(&mut cmd).map(drop).map_err(|message| Error::Clean { message })
    }

    fn clean_ignored(&self, root: &Path) -> Result<()> {
        let mut cmd = Self::git(root);
        cmd.args(["clean", "-q", "-f", "-d", "-X"]);
        process::stream(&mut cmd).map(drop).map_err(|message| Error::Clean { message })
    }
}

/// Whether `root` already holds git metadata.
pub fn is_cloned(root: &Path) -> bool {
    root.join(".git").exists()
}
