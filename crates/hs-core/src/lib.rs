//! # hs-core
//!
//! Shared error and result types for heartstat.
//!
//! Every library crate in the workspace returns [`Result`] so the CLI can
//! propagate any failure with `?` and terminate with a diagnostic.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types.
pub mod error;
/// Common result types shared by the hypothesis tests.
pub mod types;

pub use error::{Error, Result};
pub use types::{Decision, TestResult};

/// heartstat version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
