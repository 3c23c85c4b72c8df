//! # Installing the Development Tree
//!
//! The [`Installer`] drives the working copy through a fixed sequence of
//! stages:
//!
//! ```text
//! Absent -> Cloned -> Fetched -> CheckedOut -> Cleaned -> Built
//! ```
//!
//! 1.  **Clone**: if the root has no `.git` directory, create it and
//!     shallow-clone the upstream repository into it.
//! 2.  **Fetch**: resolve the target to one reference and fetch only that.
//!     Change numbers require confirmation first, then a remote listing.
//! 3.  **Checkout**: detach `HEAD` at `FETCH_HEAD`. Git refuses to overwrite
//!     local modifications, so a previous session's work is never lost.
//! 4.  **Clean**: interactively remove untracked files (stale artifacts or
//!     forgotten work, only the user can tell), then silently remove ignored
//!     files such as earlier build output.
//! 5.  **Build**: run the platform build script from `<root>/src`.
//!
//! The first failing step aborts the run with an error naming that step.
//! Nothing is rolled back. Every step is safe to repeat, so the next run
//! simply starts over from whatever state the working copy is in.
//!
//! ## Design
//!
//! Git, the build and the confirmation prompt sit behind the
//! [`GitOperations`], [`BuildOperations`] and [`Confirmation`] traits.
//! [`Installer::new`] wires the real subprocess-backed implementations;
//! [`Installer::with_operations`] accepts others, which is how the tests
//! run the whole sequence without git or a compiler.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::{debug, info};

use crate::build::{BuildInvocation, BuildOperations, SystemBuild};
use crate::config::Config;
use crate::defaults::REVIEW_URL_PREFIX;
use crate::error::{Error, Result};
use crate::git::{self, GitOperations, SystemGit};
use crate::prompt::{Confirmation, TerminalConfirmation};
use crate::target::{self, FetchRef, Resolution, Target};
use crate::toolchain;

/// Where the working copy stands in the install sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Absent,
    Cloned,
    Fetched,
    CheckedOut,
    Cleaned,
    Built,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Absent => "absent",
            Stage::Cloned => "cloned",
            Stage::Fetched => "fetched",
            Stage::CheckedOut => "checked out",
            Stage::Cleaned => "cleaned",
            Stage::Built => "built",
        };
        f.write_str(name)
    }
}

/// Summary of a successful install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// The reference that was fetched and built.
    pub fetched: FetchRef,
    /// Whether this run performed the initial clone.
    pub cloned: bool,
    /// Location of the freshly built toolchain binary.
    pub binary: PathBuf,
    /// Final stage reached; always [`Stage::Built`].
    pub stage: Stage,
}

/// Orchestrates clone, fetch, checkout, clean and build of the working copy.
pub struct Installer<'a> {
    config: &'a Config,
    git_ops: Box<dyn GitOperations + 'a>,
    build_ops: Box<dyn BuildOperations + 'a>,
    confirmation: Box<dyn Confirmation + 'a>,
}

impl<'a> Installer<'a> {
    /// Creates an installer backed by the system `git`, the real build
    /// script and a terminal prompt.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            git_ops: Box::new(SystemGit),
            build_ops: Box::new(SystemBuild),
            confirmation: Box::new(TerminalConfirmation),
        }
    }

    /// Creates an installer with custom operations.
    ///
    /// This is primarily used for testing to inject mock operations.
    pub fn with_operations(
        config: &'a Config,
        git_ops: Box<dyn GitOperations + 'a>,
        build_ops: Box<dyn BuildOperations + 'a>,
        confirmation: Box<dyn Confirmation + 'a>,
    ) -> Self {
        Self {
            config,
            git_ops,
            build_ops,
            confirmation,
        }
    }

    /// Installs the toolchain for the raw target string.
    ///
    /// An empty string installs the latest default branch.
    pub fn install(&self, raw_target: &str) -> Result<InstallReport> {
        let target = Target::classify(raw_target);
        debug!("Installing {} into {}", target, self.config.root.display());

        let cloned = self.ensure_cloned()?;
        self.advance(Stage::Cloned);

        let fetched = self.fetch(&target)?;
        self.advance(Stage::Fetched);

        self.git_ops.checkout_detached(&self.config.root)?;
        self.advance(Stage::CheckedOut);

        self.clean()?;
        self.advance(Stage::Cleaned);

        self.build()?;
        self.advance(Stage::Built);

        Ok(InstallReport {
            fetched,
            cloned,
            binary: toolchain::binary_path(&self.config.root),
            stage: Stage::Built,
        })
    }

    fn advance(&self, stage: Stage) {
        debug!("Working copy {}", stage);
    }

    /// Clones the upstream repository unless the root already has git
    /// metadata. Returns whether a clone happened.
    fn ensure_cloned(&self) -> Result<bool> {
        let root = &self.config.root;
        if git::is_cloned(root) {
            return Ok(false);
        }

        fs::create_dir_all(root).map_err(|source| Error::CreateRoot {
            path: root.clone(),
            source,
        })?;
        self.git_ops.clone_shallow(&self.config.upstream, root)?;
        Ok(true)
    }

    fn fetch(&self, target: &Target) -> Result<FetchRef> {
        let fetch_ref = self.resolve(target)?;
        info!("{}", fetch_ref.progress_message());
        self.git_ops.fetch(&self.config.root, fetch_ref.refspec())?;
        Ok(fetch_ref)
    }

    /// Resolves `target` to one reference, asking for confirmation and
    /// listing the remote for change numbers.
    fn resolve(&self, target: &Target) -> Result<FetchRef> {
        let change = match target::plan(target, &self.config.default_branch) {
            Resolution::Ready(fetch_ref) => return Ok(fetch_ref),
            Resolution::NeedsListing(change) => change,
        };

        let prompt = format!(
            "This will download and execute code from {}{}, continue?",
            REVIEW_URL_PREFIX, change
        );
        if !self.confirmation.confirm(&prompt)? {
            return Err(Error::Interrupted);
        }

        let listing = self.git_ops.list_remote(&self.config.root)?;
        target::resolve_change(&listing, change)
    }

    fn clean(&self) -> Result<()> {
        let root = &self.config.root;
        self.git_ops.clean_untracked_interactive(root)?;
        self.git_ops.clean_ignored(root)
    }

    fn build(&self) -> Result<()> {
        let platform = self.config.platform;
        let bootstrap = if platform.needs_bootstrap_hint() {
            Some(self.build_ops.bootstrap_root()?)
        } else {
            None
        };

        let invocation = BuildInvocation::new(&self.config.root, platform, bootstrap);
        self.build_ops.build(&invocation)
    }
}
