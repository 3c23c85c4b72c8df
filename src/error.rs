//! # Error Handling
//!
//! This module defines the centralized error type for `gotip`. It uses the
//! `thiserror` library to describe every way a download or a delegated run
//! can fail, with messages written for the person at the terminal.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Every subprocess step (clone, remote
//!   listing, fetch, checkout, clean, bootstrap detection, build) has its own
//!   variant so the final message names the step that failed.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Errors are never recovered from inside the library. They travel up to the
//! binary, which prints a single `gotip: <message>` line and exits non-zero.
//! By that point the failing subprocess has already streamed its own
//! diagnostics to the terminal.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for gotip operations
#[derive(Error, Debug)]
pub enum Error {
    /// The command line had the wrong shape.
    #[error("usage: {message}")]
    Usage { message: String },

    /// The toolchain has never been built into the root directory.
    #[error("not downloaded. Run 'gotip download' to install to {}", root.display())]
    NotInstalled { root: PathBuf },

    /// The user declined to run code from an unreviewed change.
    #[error("interrupted")]
    Interrupted,

    /// No remote reference exists for the requested change number.
    #[error("CL {change} not found")]
    ChangeNotFound { change: u64 },

    /// The root directory could not be created.
    #[error("failed to create repository: {source}")]
    CreateRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cloning the upstream repository failed.
    #[error("failed to clone git repository: {message}")]
    Clone { url: String, message: String },

    /// Listing the remote references failed.
    #[error("failed to list remotes: {message}")]
    ListRemote { message: String },

    /// Fetching a single reference from the upstream remote failed.
    #[error("failed to fetch {r#ref}: {message}")]
    Fetch { r#ref: String, message: String },

    /// Checking out the fetched revision failed.
    #[error("failed to checkout git repository: {message}")]
    Checkout { message: String },

    /// One of the two cleanup passes failed.
    #[error("failed to cleanup git repository: {message}")]
    Clean { message: String },

    /// The installed toolchain could not report its root for bootstrapping.
    #[error("failed to detect an existing go installation for bootstrap: {message}")]
    Bootstrap { message: String },

    /// The platform build script failed.
    #[error("failed to build go: {message}")]
    Build { message: String },

    /// The built toolchain could not be started.
    #[error("failed to run {}: {message}", binary.display())]
    Run { binary: PathBuf, message: String },

    /// Reading the confirmation answer failed.
    #[error("failed to read confirmation: {message}")]
    Prompt { message: String },

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
