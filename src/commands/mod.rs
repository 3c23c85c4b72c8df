//! # CLI Command Implementations
//!
//! Each command lives in its own file:
//!
//! - `download`: the only real gotip subcommand. It has an `Args` struct
//!   derived with `clap` and an `execute` function that builds the
//!   configuration and calls into the `gotip` library.
//! - `run`: everything else. The arguments are handed to the built go
//!   command without being parsed.

pub mod download;
pub mod run;
