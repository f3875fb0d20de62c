//! Descriptive statistics for a numeric subgroup.

use serde::{Deserialize, Serialize};

/// Count, location and spread of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of values.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (ddof = 1). NaN for fewer than 2 values.
    pub std: f64,
    /// Smallest value.
    pub min: f64,
    /// 25th percentile.
    pub q1: f64,
    /// 50th percentile.
    pub median: f64,
    /// 75th percentile.
    pub q3: f64,
    /// Largest value.
    pub max: f64,
}

/// Summarize `values`. An empty sample gives `count = 0` and NaN statistics.
pub fn describe(values: &[f64]) -> Summary {
    let n = values.len();
    if n == 0 {
        return Summary {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q1: f64::NAN,
            median: f64::NAN,
            q3: f64::NAN,
            max: f64::NAN,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mean = mean(values);
    let std = if n > 1 { variance(values, mean).sqrt() } else { f64::NAN };

    Summary {
        count: n,
        mean,
        std,
        min: sorted[0],
        q1: quantile_sorted(&sorted, 0.25),
        median: quantile_sorted(&sorted, 0.5),
        q3: quantile_sorted(&sorted, 0.75),
        max: sorted[n - 1],
    }
}

/// Arithmetic mean (NaN for an empty slice).
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median (NaN for an empty slice).
pub fn median(values: &[f64]) -> f64 {
    describe(values).median
}

/// Unbiased sample variance around a precomputed mean.
pub fn variance(values: &[f64], mean: f64) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    sum_sq_dev(values, mean) / (n - 1) as f64
}

/// Sum of squared deviations around `m`.
pub fn sum_sq_dev(values: &[f64], m: f64) -> f64 {
    values.iter().map(|x| (x - m) * (x - m)).sum()
}

/// Quantile of an ascending slice with linear interpolation between order statistics.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_describe_basic() {
        let s = describe(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(s.count, 4);
        assert_abs_diff_eq!(s.mean, 2.5);
        assert_abs_diff_eq!(s.median, 2.5);
        assert_abs_diff_eq!(s.q1, 1.75);
        assert_abs_diff_eq!(s.q3, 3.25);
        assert_abs_diff_eq!(s.std, (5.0_f64 / 3.0).sqrt(), epsilon = 1e-12);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
    }

    #[test]
    fn test_describe_single_and_empty() {
        let one = describe(&[7.0]);
        assert_eq!(one.median, 7.0);
        assert!(one.std.is_nan());

        let empty = describe(&[]);
        assert_eq!(empty.count, 0);
        assert!(empty.mean.is_nan());
        assert!(median(&[]).is_nan());
    }

    #[test]
    fn test_variance_from_sum_sq_dev() {
        let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&xs);
        assert_eq!(m, 5.0);
        assert_abs_diff_eq!(sum_sq_dev(&xs, m), 32.0, epsilon = 1e-12);
        assert_abs_diff_eq!(variance(&xs, m), 32.0 / 7.0, epsilon = 1e-12);
        assert!(variance(&[1.0], 1.0).is_nan());
    }

    #[test]
    fn test_odd_median() {
        assert_eq!(median(&[3.0, 9.0, 1.0]), 3.0);
    }
}
