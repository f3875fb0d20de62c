//! Two-sample t-tests for independent samples.
//!
//! - **Student** (`equal_var = true`): pooled variance, `df = n_a + n_b - 2`.
//! - **Welch** (`equal_var = false`): separate variances, Welch–Satterthwaite df.
//!
//! The statistic is `(mean_a - mean_b) / se`; the p-value is two-sided.

use hs_core::{Error, Result, TestResult};
use hs_data::describe::{mean, sum_sq_dev};
use serde::{Deserialize, Serialize};
use statrs::distribution::StudentsT;

use crate::common::{reject_nonfinite, stats_err, upper_tail};

/// Result of a two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TTestResult {
    /// t statistic (positive when sample `a` has the larger mean).
    pub statistic: f64,
    /// Two-sided p-value.
    pub p_value: f64,
    /// Degrees of freedom.
    pub df: f64,
    /// Mean of sample `a`.
    pub mean_a: f64,
    /// Mean of sample `b`.
    pub mean_b: f64,
    /// Whether the pooled (Student) variant was used.
    pub equal_var: bool,
}

impl TTestResult {
    /// Statistic and p-value only.
    pub fn test_result(&self) -> TestResult {
        TestResult::new(self.statistic, self.p_value)
    }
}

/// Two-sample t-test of `H0: mean(a) == mean(b)`.
///
/// Each sample needs at least two finite values.
pub fn ttest_ind(a: &[f64], b: &[f64], equal_var: bool) -> Result<TTestResult> {
    if a.len() < 2 || b.len() < 2 {
        return Err(Error::Validation(format!(
            "t-test needs at least 2 values per sample, got {} and {}",
            a.len(),
            b.len()
        )));
    }
    reject_nonfinite(a, "sample a")?;
    reject_nonfinite(b, "sample b")?;

    let (na, nb) = (a.len() as f64, b.len() as f64);
    let (mean_a, mean_b) = (mean(a), mean(b));
    let ss_a = sum_sq_dev(a, mean_a);
    let ss_b = sum_sq_dev(b, mean_b);

    let (se, df) = if equal_var {
        let df = na + nb - 2.0;
        let pooled = (ss_a + ss_b) / df;
        ((pooled * (1.0 / na + 1.0 / nb)).sqrt(), df)
    } else {
        let va = ss_a / (na - 1.0) / na;
        let vb = ss_b / (nb - 1.0) / nb;
        let se2 = va + vb;
        let df = se2 * se2 / (va * va / (na - 1.0) + vb * vb / (nb - 1.0));
        (se2.sqrt(), df)
    };

    let diff = mean_a - mean_b;
    let statistic = diff / se;
    if statistic.is_nan() {
        return Err(Error::Computation(
            "t statistic is undefined: both samples have zero variance and equal means".into(),
        ));
    }

    // Zero variance with distinct means: Welch df is 0/0, the pooled df stays valid.
    let df = if df.is_finite() { df } else { na + nb - 2.0 };
    let p_value = if statistic.is_infinite() {
        0.0
    } else {
        let t = StudentsT::new(0.0, 1.0, df).map_err(stats_err)?;
        (2.0 * upper_tail(&t, statistic.abs())).min(1.0)
    };

    tracing::debug!(statistic, p_value, df, equal_var, "two-sample t-test");
    Ok(TTestResult { statistic, p_value, df, mean_a, mean_b, equal_var })
}
