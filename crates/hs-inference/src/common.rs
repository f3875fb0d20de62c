//! Shared input checks and distribution helpers.

use hs_core::{Error, Result};
use statrs::distribution::ContinuousCDF;

pub(crate) fn reject_nonfinite(xs: &[f64], name: &str) -> Result<()> {
    if let Some(i) = xs.iter().position(|x| !x.is_finite()) {
        return Err(Error::Validation(format!(
            "{} must contain only finite values (index {} is {})",
            name, i, xs[i]
        )));
    }
    Ok(())
}

/// Upper tail, clamped into `[0, 1]`.
pub(crate) fn upper_tail<D: ContinuousCDF<f64, f64>>(dist: &D, x: f64) -> f64 {
    dist.sf(x).clamp(0.0, 1.0)
}

pub(crate) fn stats_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Computation(format!("invalid distribution parameters: {}", e))
}
