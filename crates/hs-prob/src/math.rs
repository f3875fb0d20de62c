//! Small numerically-stable math utilities used across probability code.

use std::f64::consts::SQRT_2;

/// Standard normal CDF `Φ(x)`.
///
/// Uses `erfc` so the lower tail keeps relative precision for large negative `x`.
#[inline]
pub fn normal_cdf(x: f64) -> f64 {
    0.5 * statrs::function::erf::erfc(-x / SQRT_2)
}

/// CDF of `N(mu, 1)` at `x`.
#[inline]
pub fn normal_cdf_shifted(x: f64, mu: f64) -> f64 {
    normal_cdf(x - mu)
}

/// Find `x` in `[lo, hi]` with `f(x) = target` for a non-decreasing `f`.
///
/// Plain bisection; `f(lo) <= target <= f(hi)` is the caller's responsibility.
pub fn bisect_increasing<F: Fn(f64) -> f64>(
    f: F,
    target: f64,
    mut lo: f64,
    mut hi: f64,
    tol: f64,
    max_iter: usize,
) -> f64 {
    for _ in 0..max_iter {
        let mid = 0.5 * (lo + hi);
        if f(mid) < target {
            lo = mid;
        } else {
            hi = mid;
        }
        if hi - lo <= tol * (1.0 + mid.abs()) {
            break;
        }
    }
    0.5 * (lo + hi)
}
