//! One-way analysis of variance.
//!
//! `F = (SS_between / (k - 1)) / (SS_within / (N - k))`, compared against an
//! F distribution with `(k - 1, N - k)` degrees of freedom.

use hs_core::{Error, Result, TestResult};
use hs_data::describe::{mean, sum_sq_dev};
use serde::{Deserialize, Serialize};
use statrs::distribution::FisherSnedecor;

use crate::common::{reject_nonfinite, stats_err, upper_tail};

/// Result of a one-way ANOVA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnovaResult {
    /// F statistic.
    pub statistic: f64,
    /// Upper-tail p-value.
    pub p_value: f64,
    /// Between-groups degrees of freedom (`k - 1`).
    pub df_between: f64,
    /// Within-groups degrees of freedom (`N - k`).
    pub df_within: f64,
    /// Between-groups sum of squares.
    pub ss_between: f64,
    /// Within-groups sum of squares.
    pub ss_within: f64,
}

impl AnovaResult {
    /// Statistic and p-value only.
    pub fn test_result(&self) -> TestResult {
        TestResult::new(self.statistic, self.p_value)
    }
}

/// Test `H0: all group means are equal`.
///
/// Needs at least two non-empty groups and more observations than groups.
pub fn f_oneway(groups: &[&[f64]]) -> Result<AnovaResult> {
    let k = groups.len();
    if k < 2 {
        return Err(Error::Validation(format!("ANOVA needs at least 2 groups, got {}", k)));
    }
    for (i, g) in groups.iter().enumerate() {
        if g.is_empty() {
            return Err(Error::Validation(format!("ANOVA group {} is empty", i)));
        }
        reject_nonfinite(g, &format!("ANOVA group {}", i))?;
    }

    let n_total: usize = groups.iter().map(|g| g.len()).sum();
    if n_total <= k {
        return Err(Error::Validation(format!(
            "ANOVA needs more observations ({}) than groups ({})",
            n_total, k
        )));
    }

    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n_total as f64;
    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for g in groups {
        let m = mean(g);
        ss_between += g.len() as f64 * (m - grand_mean) * (m - grand_mean);
        ss_within += sum_sq_dev(g, m);
    }

    let df_between = (k - 1) as f64;
    let df_within = (n_total - k) as f64;
    let statistic = (ss_between / df_between) / (ss_within / df_within);

    let p_value = if statistic.is_nan() {
        return Err(Error::Computation(
            "F statistic is undefined: every group is constant with the same mean".into(),
        ));
    } else if statistic.is_infinite() {
        0.0
    } else {
        let f = FisherSnedecor::new(df_between, df_within).map_err(stats_err)?;
        upper_tail(&f, statistic)
    };

    tracing::debug!(statistic, p_value, k, n_total, "one-way ANOVA");
    Ok(AnovaResult { statistic, p_value, df_between, df_within, ss_between, ss_within })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // Mussel shell measurements from five sites (McDonald et al. 1991).
    const TILLAMOOK: [f64; 10] =
        [0.0571, 0.0813, 0.0831, 0.0976, 0.0817, 0.0859, 0.0735, 0.0659, 0.0923, 0.0836];
    const NEWPORT: [f64; 8] = [0.0873, 0.0662, 0.0672, 0.0819, 0.0749, 0.0649, 0.0835, 0.0725];
    const PETERSBURG: [f64; 7] = [0.0974, 0.1352, 0.0817, 0.1016, 0.0968, 0.1064, 0.105];
    const MAGADAN: [f64; 8] = [0.1033, 0.0915, 0.0781, 0.0685, 0.0677, 0.0697, 0.0764, 0.0689];
    const TVARMINNE: [f64; 6] = [0.0703, 0.1026, 0.0956, 0.0973, 0.1039, 0.1045];

    #[test]
    fn test_reference_mussel_data() {
        let r = f_oneway(&[&TILLAMOOK, &NEWPORT, &PETERSBURG, &MAGADAN, &TVARMINNE]).unwrap();
        assert_abs_diff_eq!(r.statistic, 7.121_019_471_642_447, epsilon = 1e-9);
        assert_abs_diff_eq!(r.p_value, 0.000_281_224_231_453_454_4, epsilon = 1e-9);
        assert_eq!(r.df_between, 4.0);
        assert_eq!(r.df_within, 34.0);
    }

    #[test]
    fn test_group_order_invariance() {
        let a = f_oneway(&[&TILLAMOOK, &NEWPORT, &PETERSBURG, &MAGADAN]).unwrap();
        let b = f_oneway(&[&MAGADAN, &PETERSBURG, &TILLAMOOK, &NEWPORT]).unwrap();
        assert_abs_diff_eq!(a.statistic, b.statistic, epsilon = 1e-10);
        assert_abs_diff_eq!(a.p_value, b.p_value, epsilon = 1e-12);
    }

    #[test]
    fn test_two_groups_f_is_t_squared() {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [6.0, 7.0, 8.0, 9.0, 10.0];
        let f = f_oneway(&[&a, &b]).unwrap();
        let t = crate::ttest::ttest_ind(&a, &b, true).unwrap();
        assert_abs_diff_eq!(f.statistic, t.statistic * t.statistic, epsilon = 1e-9);
        assert_abs_diff_eq!(f.p_value, t.p_value, epsilon = 1e-10);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(f_oneway(&[&[1.0, 2.0]]).is_err());
        assert!(f_oneway(&[&[1.0, 2.0], &[]]).is_err());
        assert!(f_oneway(&[&[1.0], &[2.0]]).is_err());
        assert!(matches!(
            f_oneway(&[&[3.0, 3.0], &[3.0, 3.0]]),
            Err(Error::Computation(_))
        ));
    }

    #[test]
    fn test_constant_groups_with_distinct_means() {
        let r = f_oneway(&[&[1.0, 1.0], &[2.0, 2.0], &[3.0, 3.0]]).unwrap();
        assert!(r.statistic.is_infinite());
        assert_eq!(r.p_value, 0.0);
    }
}
