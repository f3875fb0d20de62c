//! In-memory patient table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::schema::{CategoricalColumn, NumericColumn};

/// One patient evaluated for heart disease.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Age in years.
    pub age: f64,
    /// `male` / `female`.
    pub sex: String,
    /// Resting blood pressure (mm Hg).
    pub trestbps: f64,
    /// Serum cholesterol (mg/dl).
    pub chol: f64,
    /// Chest pain type.
    pub cp: String,
    /// Exercise-induced angina.
    pub exang: bool,
    /// Fasting blood sugar > 120 mg/dl.
    pub fbs: bool,
    /// Maximum heart rate achieved.
    pub thalach: f64,
    /// `presence` / `absence`.
    pub heart_disease: String,
}

impl PatientRecord {
    /// Numeric view of a column.
    pub fn numeric(&self, col: NumericColumn) -> f64 {
        match col {
            NumericColumn::Age => self.age,
            NumericColumn::Trestbps => self.trestbps,
            NumericColumn::Chol => self.chol,
            NumericColumn::Thalach => self.thalach,
            NumericColumn::Exang => flag(self.exang),
            NumericColumn::Fbs => flag(self.fbs),
        }
    }

    /// Label view of a column.
    pub fn categorical(&self, col: CategoricalColumn) -> &str {
        match col {
            CategoricalColumn::Sex => &self.sex,
            CategoricalColumn::Cp => &self.cp,
            CategoricalColumn::HeartDisease => &self.heart_disease,
            CategoricalColumn::Exang => flag_label(self.exang),
            CategoricalColumn::Fbs => flag_label(self.fbs),
        }
    }
}

fn flag(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

fn flag_label(b: bool) -> &'static str {
    if b { "1" } else { "0" }
}

/// Immutable table of patient records, in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientTable {
    records: Vec<PatientRecord>,
}

impl PatientTable {
    /// Wrap already-validated records.
    pub fn new(records: Vec<PatientRecord>) -> Self {
        Self { records }
    }

    /// All records.
    pub fn records(&self) -> &[PatientRecord] {
        &self.records
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First `n` rows (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> &[PatientRecord] {
        &self.records[..n.min(self.records.len())]
    }

    /// Whole numeric column, in file order.
    pub fn numeric(&self, col: NumericColumn) -> Vec<f64> {
        self.records.iter().map(|r| r.numeric(col)).collect()
    }

    /// Whole categorical column, in file order.
    pub fn categorical(&self, col: CategoricalColumn) -> Vec<String> {
        self.records.iter().map(|r| r.categorical(col).to_string()).collect()
    }

    /// Distinct labels of a categorical column, sorted.
    pub fn levels(&self, col: CategoricalColumn) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.categorical(col)).collect();
        set.into_iter().map(str::to_string).collect()
    }
}

/// Renders the table like a data-frame preview.
pub struct HeadView<'a> {
    rows: &'a [PatientRecord],
}

impl PatientTable {
    /// Printable preview of the first `n` rows.
    pub fn head_view(&self, n: usize) -> HeadView<'_> {
        HeadView { rows: self.head(n) }
    }
}

impl fmt::Display for HeadView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>4} {:>6} {:>7} {:>9} {:>7} {:>18} {:>6} {:>4} {:>8} {:>14}",
            "", "age", "sex", "trestbps", "chol", "cp", "exang", "fbs", "thalach", "heart_disease"
        )?;
        for (i, r) in self.rows.iter().enumerate() {
            writeln!(
                f,
                "{:>4} {:>6.1} {:>7} {:>9.1} {:>7.1} {:>18} {:>6} {:>4} {:>8.1} {:>14}",
                i,
                r.age,
                r.sex,
                r.trestbps,
                r.chol,
                r.cp,
                flag(r.exang),
                flag(r.fbs),
                r.thalach,
                r.heart_disease
            )?;
        }
        Ok(())
    }
}
