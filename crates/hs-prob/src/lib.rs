//! Probability building blocks for heartstat.
//!
//! This crate hosts distribution math that `statrs` does not cover:
//! - the studentized range distribution (Tukey HSD p-values and critical values)
//! - small numeric helpers (normal CDF via `erfc`)

pub mod math;
pub mod studentized_range;
