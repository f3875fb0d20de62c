//! Column identifiers for the patient table.
//!
//! Columns are addressed by enum rather than by string so a typo is a parse
//! error at the CLI boundary instead of an empty subgroup deep in a test.
//! `exang` and `fbs` are 0/1 flags and can be viewed either way.

use hs_core::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Header names every input file must carry.
pub const REQUIRED_COLUMNS: [&str; 9] =
    ["age", "sex", "trestbps", "chol", "cp", "exang", "fbs", "thalach", "heart_disease"];

/// A column that can be read as numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    /// Age in years.
    Age,
    /// Resting blood pressure (mm Hg).
    Trestbps,
    /// Serum cholesterol (mg/dl).
    Chol,
    /// Maximum heart rate achieved.
    Thalach,
    /// Exercise-induced angina as 0/1.
    Exang,
    /// Fasting blood sugar > 120 mg/dl as 0/1.
    Fbs,
}

impl NumericColumn {
    /// All numeric views, in header order.
    pub const ALL: [NumericColumn; 6] = [
        NumericColumn::Age,
        NumericColumn::Trestbps,
        NumericColumn::Chol,
        NumericColumn::Exang,
        NumericColumn::Fbs,
        NumericColumn::Thalach,
    ];

    /// Header name.
    pub fn name(self) -> &'static str {
        match self {
            NumericColumn::Age => "age",
            NumericColumn::Trestbps => "trestbps",
            NumericColumn::Chol => "chol",
            NumericColumn::Thalach => "thalach",
            NumericColumn::Exang => "exang",
            NumericColumn::Fbs => "fbs",
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumericColumn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NumericColumn::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::Validation(format!(
                    "'{}' is not a numeric column (expected one of: age, trestbps, chol, thalach, exang, fbs)",
                    s
                ))
            })
    }
}

/// A column that can be read as labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalColumn {
    /// `male` / `female`.
    Sex,
    /// Chest pain type.
    Cp,
    /// `presence` / `absence`.
    HeartDisease,
    /// Exercise-induced angina as `"0"`/`"1"`.
    Exang,
    /// Fasting blood sugar flag as `"0"`/`"1"`.
    Fbs,
}

impl CategoricalColumn {
    /// All categorical views, in header order.
    pub const ALL: [CategoricalColumn; 5] = [
        CategoricalColumn::Sex,
        CategoricalColumn::Cp,
        CategoricalColumn::Exang,
        CategoricalColumn::Fbs,
        CategoricalColumn::HeartDisease,
    ];

    /// Header name.
    pub fn name(self) -> &'static str {
        match self {
            CategoricalColumn::Sex => "sex",
            CategoricalColumn::Cp => "cp",
            CategoricalColumn::HeartDisease => "heart_disease",
            CategoricalColumn::Exang => "exang",
            CategoricalColumn::Fbs => "fbs",
        }
    }
}

impl fmt::Display for CategoricalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CategoricalColumn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoricalColumn::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::Validation(format!(
                    "'{}' is not a categorical column (expected one of: sex, cp, heart_disease, exang, fbs)",
                    s
                ))
            })
    }
}
