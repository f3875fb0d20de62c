//! Tukey's honestly significant difference (Tukey–Kramer for unequal sizes).
//!
//! All pairwise mean differences are compared against the studentized range
//! distribution with `k` groups and `N - k` degrees of freedom, which keeps
//! the family-wise error rate at `alpha`.

use std::collections::BTreeMap;
use std::fmt;

use hs_core::{Error, Result};
use hs_data::describe::{mean, sum_sq_dev};
use hs_prob::studentized_range;
use serde::{Deserialize, Serialize};

use crate::common::reject_nonfinite;

/// Per-group summary used by the comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TukeyGroup {
    /// Group label.
    pub label: String,
    /// Number of observations.
    pub n: usize,
    /// Group mean.
    pub mean: f64,
}

/// One pairwise comparison (`group1 < group2` in label order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TukeyPair {
    /// First group label.
    pub group1: String,
    /// Second group label.
    pub group2: String,
    /// `mean(group2) - mean(group1)`.
    pub meandiff: f64,
    /// Family-wise adjusted p-value.
    pub p_adj: f64,
    /// Lower simultaneous confidence bound on `meandiff`.
    pub lower: f64,
    /// Upper simultaneous confidence bound on `meandiff`.
    pub upper: f64,
    /// `p_adj < alpha`.
    pub reject: bool,
}

/// Full Tukey HSD table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TukeyHsdResult {
    /// Family-wise error rate.
    pub alpha: f64,
    /// Number of groups.
    pub k: usize,
    /// Error degrees of freedom (`N - k`).
    pub df: f64,
    /// Mean squared error of the one-way model.
    pub mse: f64,
    /// Critical studentized range at `1 - alpha`.
    pub q_crit: f64,
    /// Groups in label order.
    pub groups: Vec<TukeyGroup>,
    /// `k (k - 1) / 2` comparisons.
    pub pairs: Vec<TukeyPair>,
}

impl TukeyHsdResult {
    /// Pairs whose null of equal means is rejected.
    pub fn significant(&self) -> impl Iterator<Item = &TukeyPair> {
        self.pairs.iter().filter(|p| p.reject)
    }
}

/// Pairwise Tukey HSD over observations `values` labelled by `labels`.
///
/// Labels are sorted, so group order in the input does not matter.
pub fn pairwise_tukeyhsd<S: AsRef<str>>(
    values: &[f64],
    labels: &[S],
    alpha: f64,
) -> Result<TukeyHsdResult> {
    if values.len() != labels.len() {
        return Err(Error::Validation(format!(
            "values and labels differ in length ({} vs {})",
            values.len(),
            labels.len()
        )));
    }
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(Error::Validation(format!("alpha must be in (0, 1), got {}", alpha)));
    }
    reject_nonfinite(values, "values")?;

    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for (v, l) in values.iter().zip(labels) {
        grouped.entry(l.as_ref()).or_default().push(*v);
    }

    let k = grouped.len();
    if k < 2 {
        return Err(Error::Validation(format!("Tukey HSD needs at least 2 groups, got {}", k)));
    }
    let n_total = values.len();
    if n_total <= k {
        return Err(Error::Validation(format!(
            "Tukey HSD needs more observations ({}) than groups ({})",
            n_total, k
        )));
    }

    let mut groups = Vec::with_capacity(k);
    let mut ss_within = 0.0;
    for (label, xs) in &grouped {
        let m = mean(xs);
        ss_within += sum_sq_dev(xs, m);
        groups.push(TukeyGroup { label: (*label).to_string(), n: xs.len(), mean: m });
    }

    let df = (n_total - k) as f64;
    let mse = ss_within / df;
    let kf = k as f64;
    let q_crit = studentized_range::quantile(1.0 - alpha, kf, df)?;

    let mut pairs = Vec::with_capacity(k * (k - 1) / 2);
    for i in 0..k {
        for j in (i + 1)..k {
            let (g1, g2) = (&groups[i], &groups[j]);
            let meandiff = g2.mean - g1.mean;
            let se = (0.5 * mse * (1.0 / g1.n as f64 + 1.0 / g2.n as f64)).sqrt();
            let q = meandiff.abs() / se;

            let p_adj = if q.is_nan() {
                if meandiff == 0.0 {
                    1.0
                } else {
                    return Err(Error::Computation("Tukey HSD: undefined standard error".into()));
                }
            } else if q.is_infinite() {
                0.0
            } else {
                studentized_range::sf(q, kf, df)?
            };
            let margin = q_crit * se;
            pairs.push(TukeyPair {
                group1: g1.label.clone(),
                group2: g2.label.clone(),
                meandiff,
                p_adj,
                lower: meandiff - margin,
                upper: meandiff + margin,
                reject: p_adj < alpha,
            });
        }
    }

    tracing::debug!(k, df, mse, q_crit, "Tukey HSD");
    Ok(TukeyHsdResult { alpha, k, df, mse, q_crit, groups, pairs })
}

impl fmt::Display for TukeyHsdResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = ["group1", "group2", "meandiff", "p-adj", "lower", "upper", "reject"];
        let rows: Vec<[String; 7]> = self
            .pairs
            .iter()
            .map(|p| {
                [
                    p.group1.clone(),
                    p.group2.clone(),
                    format!("{:.4}", p.meandiff),
                    format!("{:.4}", p.p_adj),
                    format!("{:.4}", p.lower),
                    format!("{:.4}", p.upper),
                    if p.reject { "True".into() } else { "False".into() },
                ]
            })
            .collect();

        let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }
        let line_len = widths.iter().sum::<usize>() + widths.len() - 1;
        let write_row = |f: &mut fmt::Formatter<'_>, cells: &[&str]| -> fmt::Result {
            let line: Vec<String> =
                cells.iter().zip(&widths).map(|(c, w)| format!("{:>w$}", c, w = *w)).collect();
            writeln!(f, "{}", line.join(" "))
        };

        writeln!(f, "Multiple Comparison of Means - Tukey HSD, FWER={:.2}", self.alpha)?;
        writeln!(f, "{}", "=".repeat(line_len))?;
        write_row(f, &header)?;
        writeln!(f, "{}", "-".repeat(line_len))?;
        for row in &rows {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            write_row(f, &cells)?;
        }
        write!(f, "{}", "-".repeat(line_len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn three_groups() -> (Vec<f64>, Vec<&'static str>) {
        let mut values = Vec::new();
        let mut labels = Vec::new();
        for (label, base) in [("c", 20.0), ("a", 10.0), ("b", 10.5)] {
            for d in [-1.0, -0.5, 0.0, 0.5, 1.0] {
                values.push(base + d);
                labels.push(label);
            }
        }
        (values, labels)
    }

    #[test]
    fn test_pair_count_and_order() {
        let (values, labels) = three_groups();
        let r = pairwise_tukeyhsd(&values, &labels, 0.05).unwrap();
        assert_eq!(r.k, 3);
        assert_eq!(r.pairs.len(), 3);
        let names: Vec<(&str, &str)> =
            r.pairs.iter().map(|p| (p.group1.as_str(), p.group2.as_str())).collect();
        assert_eq!(names, vec![("a", "b"), ("a", "c"), ("b", "c")]);
        assert_eq!(r.groups[0].label, "a");
        assert_eq!(r.df, 12.0);
    }

    #[test]
    fn test_large_difference_rejected_small_not() {
        let (values, labels) = three_groups();
        let r = pairwise_tukeyhsd(&values, &labels, 0.05).unwrap();
        let ab = &r.pairs[0];
        let ac = &r.pairs[1];
        assert_abs_diff_eq!(ab.meandiff, 0.5, epsilon = 1e-12);
        assert!(!ab.reject);
        assert!(ab.lower < 0.0 && ab.upper > 0.0);
        assert!(ac.reject);
        assert!(ac.p_adj < 0.001);
        assert!(ac.lower > 0.0);
        assert_eq!(r.significant().count(), 2);
    }

    #[test]
    fn test_two_groups_match_student_t() {
        let a = [140.0, 152.0, 161.0, 148.0, 171.0, 139.0];
        let b = [158.0, 172.0, 165.0, 181.0, 149.0];
        let values: Vec<f64> = a.iter().chain(&b).copied().collect();
        let labels: Vec<&str> = a.iter().map(|_| "a").chain(b.iter().map(|_| "b")).collect();

        let tukey = pairwise_tukeyhsd(&values, &labels, 0.05).unwrap();
        let t = crate::ttest::ttest_ind(&a, &b, true).unwrap();
        assert_abs_diff_eq!(tukey.pairs[0].p_adj, t.p_value, epsilon = 1e-5);
    }

    #[test]
    fn test_display_table() {
        let (values, labels) = three_groups();
        let text = pairwise_tukeyhsd(&values, &labels, 0.05).unwrap().to_string();
        assert!(text.starts_with("Multiple Comparison of Means - Tukey HSD, FWER=0.05"));
        assert!(text.contains("group1"));
        assert!(text.contains("True"));
        assert!(text.contains("False"));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(pairwise_tukeyhsd(&[1.0, 2.0], &["a"], 0.05).is_err());
        assert!(pairwise_tukeyhsd(&[1.0, 2.0, 3.0], &["a", "a", "a"], 0.05).is_err());
        assert!(pairwise_tukeyhsd(&[1.0, 2.0], &["a", "b"], 0.05).is_err());
        assert!(pairwise_tukeyhsd(&[1.0, 2.0, 3.0, 4.0], &["a", "a", "b", "b"], 1.5).is_err());
    }
}
