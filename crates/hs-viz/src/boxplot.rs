//! Box plot artifact: one box per category of a grouping column.
//!
//! Box bounds are the 25th/75th percentiles (linear interpolation), whiskers
//! reach the most extreme observations within 1.5 IQR of the box, and
//! everything beyond the whiskers is an outlier.

use std::time::{SystemTime, UNIX_EPOCH};

use hs_core::Result;
use hs_data::describe::{mean, quantile_sorted};
use serde::{Deserialize, Serialize};

/// Schema tag carried by every box-plot artifact.
pub const BOXPLOT_SCHEMA_VERSION: &str = "heartstat_boxplot_v0";

/// Whisker reach in units of the interquartile range.
const WHISKER_IQR: f64 = 1.5;

/// Grouped box plot ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxPlotArtifact {
    /// Always [`BOXPLOT_SCHEMA_VERSION`].
    pub schema_version: String,
    /// Producer metadata.
    pub meta: BoxPlotMeta,
    /// Plot title.
    pub title: String,
    /// Label of the numeric axis.
    pub value_label: String,
    /// Label of the category axis.
    pub group_label: String,
    /// One entry per category, in input order.
    pub groups: Vec<BoxPlotGroup>,
}

/// Producer metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxPlotMeta {
    /// Tool name.
    pub tool: String,
    /// Tool version.
    pub tool_version: String,
    /// Creation time.
    pub created_unix_ms: u128,
}

/// Box statistics for one category. All statistics are `None` when `n == 0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotGroup {
    /// Category label.
    pub label: String,
    /// Number of observations.
    pub n: usize,
    /// Arithmetic mean.
    pub mean: Option<f64>,
    /// First quartile.
    pub q1: Option<f64>,
    /// Median.
    pub median: Option<f64>,
    /// Third quartile.
    pub q3: Option<f64>,
    /// Lower whisker end.
    pub whisker_low: Option<f64>,
    /// Upper whisker end.
    pub whisker_high: Option<f64>,
    /// Observations beyond the whiskers, ascending.
    pub outliers: Vec<f64>,
}

impl BoxPlotGroup {
    /// Compute box statistics for `values`.
    pub fn from_values(label: &str, values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                label: label.to_string(),
                n: 0,
                mean: None,
                q1: None,
                median: None,
                q3: None,
                whisker_low: None,
                whisker_high: None,
                outliers: Vec::new(),
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let lo_fence = q1 - WHISKER_IQR * iqr;
        let hi_fence = q3 + WHISKER_IQR * iqr;

        // The fences bracket q1..q3, so at least one observation lies inside.
        let inside = || sorted.iter().copied().filter(|&x| x >= lo_fence && x <= hi_fence);
        let whisker_low = inside().next().unwrap_or(q1);
        let whisker_high = inside().last().unwrap_or(q3);
        let outliers =
            sorted.iter().copied().filter(|&x| x < whisker_low || x > whisker_high).collect();

        Self {
            label: label.to_string(),
            n: sorted.len(),
            mean: Some(mean(&sorted)),
            q1: Some(q1),
            median: Some(median),
            q3: Some(q3),
            whisker_low: Some(whisker_low),
            whisker_high: Some(whisker_high),
            outliers,
        }
    }

    /// Smallest and largest value drawn for this group (whiskers and outliers).
    pub fn extent(&self) -> Option<(f64, f64)> {
        let lo = self.whisker_low?;
        let hi = self.whisker_high?;
        let lo = self.outliers.first().map_or(lo, |&o| o.min(lo));
        let hi = self.outliers.last().map_or(hi, |&o| o.max(hi));
        Some((lo, hi))
    }
}

impl BoxPlotArtifact {
    /// Overall value range across groups, or `None` if every group is empty.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.groups.iter().filter_map(BoxPlotGroup::extent).fold(None, |acc, (lo, hi)| {
            Some(match acc {
                None => (lo, hi),
                Some((a, b)) => (a.min(lo), b.max(hi)),
            })
        })
    }
}

fn now_unix_ms() -> Result<u128> {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| hs_core::Error::Computation(format!("system time error: {}", e)))?;
    Ok(d.as_millis())
}

/// Build a box-plot artifact from `(label, values)` groups.
pub fn boxplot_artifact<S: AsRef<str>>(
    title: &str,
    value_label: &str,
    group_label: &str,
    groups: &[(S, Vec<f64>)],
) -> Result<BoxPlotArtifact> {
    Ok(BoxPlotArtifact {
        schema_version: BOXPLOT_SCHEMA_VERSION.to_string(),
        meta: BoxPlotMeta {
            tool: "heartstat".to_string(),
            tool_version: hs_core::VERSION.to_string(),
            created_unix_ms: now_unix_ms()?,
        },
        title: title.to_string(),
        value_label: value_label.to_string(),
        group_label: group_label.to_string(),
        groups: groups
            .iter()
            .map(|(label, values)| BoxPlotGroup::from_values(label.as_ref(), values))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_quartiles_and_whiskers_without_outliers() {
        let g = BoxPlotGroup::from_values("a", &[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(g.n, 5);
        assert_eq!(g.q1, Some(2.0));
        assert_eq!(g.median, Some(3.0));
        assert_eq!(g.q3, Some(4.0));
        assert_eq!(g.whisker_low, Some(1.0));
        assert_eq!(g.whisker_high, Some(5.0));
        assert!(g.outliers.is_empty());
    }

    #[test]
    fn test_outliers_beyond_fences() {
        // q1 = 2.5, q3 = 7.5, IQR = 5, fences at -5 and 15.
        let values = [40.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, -10.0];
        let g = BoxPlotGroup::from_values("b", &values);
        assert_abs_diff_eq!(g.q1.unwrap(), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(g.q3.unwrap(), 7.5, epsilon = 1e-12);
        assert_eq!(g.whisker_low, Some(1.0));
        assert_eq!(g.whisker_high, Some(9.0));
        assert_eq!(g.outliers, vec![-10.0, 40.0]);
        assert_eq!(g.extent(), Some((-10.0, 40.0)));
    }

    #[test]
    fn test_empty_group_has_no_box() {
        let g = BoxPlotGroup::from_values("none", &[]);
        assert_eq!(g.n, 0);
        assert!(g.median.is_none());
        assert!(g.extent().is_none());
    }

    #[test]
    fn test_artifact_schema_and_range() {
        let groups = vec![("absence", vec![150.0, 160.0, 170.0]), ("presence", vec![120.0, 140.0])];
        let art = boxplot_artifact("thalach by heart_disease", "thalach", "heart_disease", &groups)
            .unwrap();
        assert_eq!(art.schema_version, BOXPLOT_SCHEMA_VERSION);
        assert_eq!(art.meta.tool, "heartstat");
        assert_eq!(art.groups.len(), 2);
        assert_eq!(art.groups[1].label, "presence");
        assert_eq!(art.value_range(), Some((120.0, 170.0)));
    }
}
