//! # Target Resolution
//!
//! Turns the raw string a user passes to `gotip download` into the single
//! remote reference that should be fetched.
//!
//! ## Classification
//!
//! - An empty string means "latest": the default branch is fetched by name.
//! - A string that is the canonical decimal form of a positive integer is a
//!   change number (`227037`). Leading zeros, signs and whitespace
//!   disqualify it, so `00042` is a branch.
//! - Anything else is a branch name, fetched as `refs/heads/<name>`.
//!
//! ## Change numbers
//!
//! A change has one reference per patch set, published under
//! `refs/changes/<shard>/<change>/<patch set>` where the shard is the last
//! two digits of the change number. `git ls-remote` lists them as:
//!
//! ```text
//! 2621ba2c60d05ec0b9ef37cd71e45047b004cead	refs/changes/37/227037/1
//! 51f2af2be0878e1541d2769bd9d977a7e99db9ab	refs/changes/37/227037/2
//! af1f3b008281c61c54a5d203ffb69334b7af007c	refs/changes/37/227037/3
//! 6a10ebae05ce4b01cb93b73c47bef67c0f5c5f2a	refs/changes/37/227037/meta
//! ```
//!
//! [`parse_candidates`] turns such a listing into typed [`CandidateRef`]s
//! and [`select_latest`] picks the highest patch set. The two steps are kept
//! apart so each can be tested on its own.

use std::fmt;

use log::warn;
use regex::Regex;

use crate::error::{Error, Result};

/// What the user asked to install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// No target given; track the default branch.
    Latest,
    /// A numbered change request.
    Change(u64),
    /// A branch name, taken literally.
    Branch(String),
}

impl Target {
    /// Classifies a raw user string.
    pub fn classify(raw: &str) -> Self {
        if raw.is_empty() {
            return Target::Latest;
        }

        match raw.parse::<u64>() {
            Ok(n) if n >= 1 && n.to_string() == raw => Target::Change(n),
            _ => Target::Branch(raw.to_string()),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Latest => write!(f, "latest"),
            Target::Change(n) => write!(f, "CL {}", n),
            Target::Branch(name) => write!(f, "branch {}", name),
        }
    }
}

/// One patch set reference found in a remote listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRef {
    /// Revision hash the reference points at.
    pub hash: String,
    /// Full reference path, e.g. `refs/changes/37/227037/3`.
    pub ref_path: String,
    /// Patch set number parsed from the last path segment.
    pub patch_set: u64,
}

/// The single reference chosen for fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRef {
    /// The remote's default branch, fetched by bare name.
    DefaultBranch(String),
    /// A branch head, `refs/heads/<name>`.
    Branch { name: String, ref_path: String },
    /// A patch set of a change.
    PatchSet {
        change: u64,
        patch_set: u64,
        ref_path: String,
    },
}

impl FetchRef {
    /// The refspec handed to `git fetch`.
    pub fn refspec(&self) -> &str {
        match self {
            FetchRef::DefaultBranch(name) => name,
            FetchRef::Branch { ref_path, .. } => ref_path,
            FetchRef::PatchSet { ref_path, .. } => ref_path,
        }
    }

    /// Human readable progress line logged before the fetch.
    pub fn progress_message(&self) -> String {
        match self {
            FetchRef::DefaultBranch(_) => "Updating the go development tree...".to_string(),
            FetchRef::Branch { name, .. } => format!("Fetching branch {}...", name),
            FetchRef::PatchSet {
                change, patch_set, ..
            } => format!("Fetching CL {}, Patch Set {}...", change, patch_set),
        }
    }
}

/// Parses `git ls-remote` output into the patch set references of `change`.
///
/// A line matches only if its reference path is exactly
/// `refs/changes/<2 digits>/<change>/<digits>`; the `meta` reference and
/// references of other changes are skipped. Order of the listing is kept.
pub fn parse_candidates(listing: &str, change: u64) -> Result<Vec<CandidateRef>> {
    let pattern = Regex::new(&format!(
        r"^refs/changes/\d{{2}}/{}/(\d+)$",
        regex::escape(&change.to_string())
    ))?;

    let candidates = listing
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let hash = fields.next()?;
            let ref_path = fields.next()?;
            let captures = pattern.captures(ref_path)?;
            let patch_set = captures[1].parse::<u64>().ok()?;
            Some(CandidateRef {
                hash: hash.to_string(),
                ref_path: ref_path.to_string(),
                patch_set,
            })
        })
        .collect();

    Ok(candidates)
}

/// Picks the candidate with the highest patch set.
///
/// Patch set numbers are unique within a change; should a listing repeat
/// one anyway, the last occurrence wins.
pub fn select_latest(candidates: &[CandidateRef]) -> Option<&CandidateRef> {
    let best = candidates.iter().max_by_key(|c| c.patch_set)?;

    let duplicates = candidates
        .iter()
        .filter(|c| c.patch_set == best.patch_set)
        .count();
    if duplicates > 1 {
        warn!(
            "Patch set {} listed {} times, using {}",
            best.patch_set, duplicates, best.ref_path
        );
    }

    Some(best)
}

/// Resolves a change number against a remote listing.
pub fn resolve_change(listing: &str, change: u64) -> Result<FetchRef> {
    let candidates = parse_candidates(listing, change)?;
    let latest = select_latest(&candidates).ok_or(Error::ChangeNotFound { change })?;

    Ok(FetchRef::PatchSet {
        change,
        patch_set: latest.patch_set,
        ref_path: latest.ref_path.clone(),
    })
}

/// First step of resolving a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The reference is known without asking the remote.
    Ready(FetchRef),
    /// The change's patch sets must be looked up in a remote listing and
    /// passed to [`resolve_change`].
    NeedsListing(u64),
}

/// Decides how `target` is resolved.
///
/// The default branch is fetched by bare name and branches as
/// `refs/heads/<name>`; change numbers need a listing.
pub fn plan(target: &Target, default_branch: &str) -> Resolution {
    match target {
        Target::Latest => Resolution::Ready(FetchRef::DefaultBranch(default_branch.to_string())),
        Target::Branch(name) => Resolution::Ready(FetchRef::Branch {
            name: name.clone(),
            ref_path: format!("refs/heads/{}", name),
        }),
        Target::Change(change) => Resolution::NeedsListing(*change),
    }
}
