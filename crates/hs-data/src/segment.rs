//! Subgroups and contingency tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::schema::{CategoricalColumn, NumericColumn};
use crate::table::PatientTable;

/// Values of `value` on rows where `by == label`, in file order.
///
/// An unknown label yields an empty vector, not an error.
pub fn segment(
    table: &PatientTable,
    value: NumericColumn,
    by: CategoricalColumn,
    label: &str,
) -> Vec<f64> {
    table
        .records()
        .iter()
        .filter(|r| r.categorical(by) == label)
        .map(|r| r.numeric(value))
        .collect()
}

/// Cross-tabulated counts of two categorical columns.
///
/// Row and column labels are sorted; `counts[i][j]` counts rows with
/// `row_labels[i]` and `col_labels[j]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContingencyTable {
    /// Column that indexes rows.
    pub row_variable: String,
    /// Column that indexes columns.
    pub col_variable: String,
    /// Sorted row labels.
    pub row_labels: Vec<String>,
    /// Sorted column labels.
    pub col_labels: Vec<String>,
    /// Counts, row-major.
    pub counts: Vec<Vec<u64>>,
}

impl ContingencyTable {
    /// Row sums.
    pub fn row_totals(&self) -> Vec<u64> {
        self.counts.iter().map(|row| row.iter().sum()).collect()
    }

    /// Column sums.
    pub fn col_totals(&self) -> Vec<u64> {
        let n_cols = self.col_labels.len();
        let mut totals = vec![0u64; n_cols];
        for row in &self.counts {
            for (j, &c) in row.iter().enumerate().take(n_cols) {
                totals[j] += c;
            }
        }
        totals
    }

    /// Grand total.
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

/// Cross-tabulate `rows` against `cols`.
pub fn crosstab(
    table: &PatientTable,
    rows: CategoricalColumn,
    cols: CategoricalColumn,
) -> ContingencyTable {
    let row_labels = table.levels(rows);
    let col_labels = table.levels(cols);

    let row_idx: BTreeMap<&str, usize> =
        row_labels.iter().enumerate().map(|(i, l)| (l.as_str(), i)).collect();
    let col_idx: BTreeMap<&str, usize> =
        col_labels.iter().enumerate().map(|(j, l)| (l.as_str(), j)).collect();

    let mut counts = vec![vec![0u64; col_labels.len()]; row_labels.len()];
    for r in table.records() {
        let i = row_idx[r.categorical(rows)];
        let j = col_idx[r.categorical(cols)];
        counts[i][j] += 1;
    }

    ContingencyTable {
        row_variable: rows.name().to_string(),
        col_variable: cols.name().to_string(),
        row_labels,
        col_labels,
        counts,
    }
}

impl fmt::Display for ContingencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_w = self
            .row_labels
            .iter()
            .map(String::len)
            .chain(std::iter::once(self.row_variable.len()))
            .max()
            .unwrap_or(0);
        let col_w: Vec<usize> = self.col_labels.iter().map(|l| l.len().max(6)).collect();

        write!(f, "{:<label_w$}", self.row_variable)?;
        for (l, w) in self.col_labels.iter().zip(&col_w) {
            write!(f, "  {:>w$}", l, w = *w)?;
        }
        writeln!(f)?;
        for (label, row) in self.row_labels.iter().zip(&self.counts) {
            write!(f, "{:<label_w$}", label)?;
            for (c, w) in row.iter().zip(&col_w) {
                write!(f, "  {:>w$}", c, w = *w)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
