//! Pearson chi-square test of independence on an `r x c` contingency table.

use hs_core::{Error, Result, TestResult};
use serde::{Deserialize, Serialize};
use statrs::distribution::ChiSquared;

use crate::common::{stats_err, upper_tail};

/// Result of a chi-square test of independence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chi2Result {
    /// Chi-square statistic.
    pub statistic: f64,
    /// Upper-tail p-value.
    pub p_value: f64,
    /// Degrees of freedom, `(r - 1)(c - 1)`.
    pub dof: usize,
    /// Expected counts under independence.
    pub expected: Vec<Vec<f64>>,
    /// Whether Yates' continuity correction was applied.
    pub correction_applied: bool,
}

impl Chi2Result {
    /// Statistic and p-value only.
    pub fn test_result(&self) -> TestResult {
        TestResult::new(self.statistic, self.p_value)
    }
}

/// Chi-square test of independence.
///
/// With `correction` set and `dof == 1` (a 2x2 table), Yates' continuity
/// correction moves each observed count half a unit towards its expectation.
pub fn chi2_contingency(observed: &[Vec<u64>], correction: bool) -> Result<Chi2Result> {
    let r = observed.len();
    if r < 2 {
        return Err(Error::Validation(format!("contingency table needs at least 2 rows, got {}", r)));
    }
    let c = observed[0].len();
    if c < 2 {
        return Err(Error::Validation(format!(
            "contingency table needs at least 2 columns, got {}",
            c
        )));
    }
    if let Some(i) = observed.iter().position(|row| row.len() != c) {
        return Err(Error::Validation(format!(
            "contingency table is ragged: row {} has {} columns, expected {}",
            i,
            observed[i].len(),
            c
        )));
    }

    let row_totals: Vec<f64> = observed.iter().map(|row| row.iter().sum::<u64>() as f64).collect();
    let col_totals: Vec<f64> =
        (0..c).map(|j| observed.iter().map(|row| row[j]).sum::<u64>() as f64).collect();
    if let Some(i) = row_totals.iter().position(|&t| t == 0.0) {
        return Err(Error::Validation(format!("row {} of the contingency table is all zeros", i)));
    }
    if let Some(j) = col_totals.iter().position(|&t| t == 0.0) {
        return Err(Error::Validation(format!(
            "column {} of the contingency table is all zeros",
            j
        )));
    }
    let total: f64 = row_totals.iter().sum();

    let expected: Vec<Vec<f64>> = row_totals
        .iter()
        .map(|rt| col_totals.iter().map(|ct| rt * ct / total).collect())
        .collect();

    let dof = (r - 1) * (c - 1);
    let correction_applied = correction && dof == 1;

    let mut statistic = 0.0;
    for (obs_row, exp_row) in observed.iter().zip(&expected) {
        for (&o, &e) in obs_row.iter().zip(exp_row) {
            let mut o = o as f64;
            if correction_applied {
                let diff = e - o;
                o += diff.signum() * diff.abs().min(0.5);
            }
            statistic += (o - e) * (o - e) / e;
        }
    }

    if !statistic.is_finite() {
        return Err(Error::Computation("chi-square statistic is not finite".into()));
    }
    let dist = ChiSquared::new(dof as f64).map_err(stats_err)?;
    let p_value = upper_tail(&dist, statistic);

    tracing::debug!(statistic, p_value, dof, correction_applied, "chi-square test");
    Ok(Chi2Result { statistic, p_value, dof, expected, correction_applied })
}
