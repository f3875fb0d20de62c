//! # hs-inference
//!
//! Classical hypothesis tests used by the heart-disease analysis.
//!
//! Every test is a pure function of its inputs and returns
//! [`hs_core::Result`]; invalid input (too few observations, non-finite
//! values, degenerate tables) is an error, never a silent NaN.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// One-way analysis of variance.
pub mod anova;
/// Chi-square test of independence.
pub mod chi2;
mod common;
/// Tukey's honestly significant difference test.
pub mod tukey;
/// Two-sample t-tests (Student and Welch).
pub mod ttest;

pub use anova::{AnovaResult, f_oneway};
pub use chi2::{Chi2Result, chi2_contingency};
pub use tukey::{TukeyGroup, TukeyHsdResult, TukeyPair, pairwise_tukeyhsd};
pub use ttest::{TTestResult, ttest_ind};
