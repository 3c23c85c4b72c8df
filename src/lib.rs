//! # gotip Library
//!
//! This library keeps a local checkout of the Go source tree, switches it to
//! whatever the user asks for (the latest default branch, a named branch, or
//! the newest patch set of a pending change), rebuilds the toolchain from it
//! and runs the result. It is used by the `gotip` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use gotip::target::{self, FetchRef, Resolution, Target};
//!
//! let listing = "\
//! 2621ba2c60d05ec0b9ef37cd71e45047b004cead\trefs/changes/37/227037/1
//! af1f3b008281c61c54a5d203ffb69334b7af007c\trefs/changes/37/227037/3
//! 6a10ebae05ce4b01cb93b73c47bef67c0f5c5f2a\trefs/changes/37/227037/meta
//! ";
//!
//! let target = Target::classify("227037");
//! assert_eq!(target::plan(&target, "master"), Resolution::NeedsListing(227037));
//!
//! let fetch_ref = target::resolve_change(listing, 227037).unwrap();
//! assert_eq!(fetch_ref.refspec(), "refs/changes/37/227037/3");
//!
//! // Leading zeros make a branch name, not a change number
//! assert_eq!(Target::classify("00042"), Target::Branch("00042".to_string()));
//! ```
//!
//! ## Core Concepts
//!
//! - **Configuration (`config`, `defaults`)**: The root directory, upstream
//!   URL and default branch, assembled once and passed around explicitly.
//! - **Target resolution (`target`)**: Classifies the user's string and picks
//!   the reference to fetch.
//! - **Installation (`install`)**: Drives the working copy through clone,
//!   fetch, checkout, clean and build, on top of the subprocess wrappers in
//!   `git`, `build` and `process` and the confirmation prompt in `prompt`.
//! - **Delegation (`toolchain`)**: Locates the built `go` command and runs
//!   it with forwarded arguments.

pub mod build;
pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod install;
pub mod process;
pub mod prompt;
pub mod target;
pub mod toolchain;

#[cfg(test)]
mod target_proptest;
