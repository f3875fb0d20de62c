//! Machine-readable report of an `analyze` run.

use std::time::{SystemTime, UNIX_EPOCH};

use hs_data::{ContingencyTable, Summary};
use hs_inference::{AnovaResult, Chi2Result, TTestResult, TukeyHsdResult};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub schema_version: String,
    pub meta: ReportMeta,
    pub rows: usize,
    pub alpha: f64,
    pub thalach: ThalachComparison,
    pub ttests: Vec<VariableTTest>,
    pub anova: AnovaSection,
    pub tukey: TukeyHsdResult,
    pub chi2: Chi2Section,
    pub plots: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ReportMeta {
    pub tool: String,
    pub tool_version: String,
    pub created_unix_ms: u128,
    pub input: String,
}

/// `thalach` for patients with and without heart disease.
#[derive(Debug, Serialize)]
pub struct ThalachComparison {
    pub presence: Summary,
    pub absence: Summary,
    /// `mean(presence) - mean(absence)`
    pub mean_diff: f64,
    /// `median(presence) - median(absence)`
    pub median_diff: f64,
    pub ttest: TTestResult,
}

#[derive(Debug, Serialize)]
pub struct VariableTTest {
    pub variable: String,
    pub ttest: TTestResult,
    pub reject: bool,
}

#[derive(Debug, Serialize)]
pub struct AnovaSection {
    pub value: String,
    pub groups: Vec<String>,
    pub result: AnovaResult,
    pub reject: bool,
}

#[derive(Debug, Serialize)]
pub struct Chi2Section {
    pub table: ContingencyTable,
    pub result: Chi2Result,
    pub reject: bool,
}

impl ReportMeta {
    pub fn new(input: &str) -> anyhow::Result<Self> {
        let created_unix_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| anyhow::anyhow!("system time error: {}", e))?
            .as_millis();
        Ok(Self {
            tool: "heartstat".to_string(),
            tool_version: hs_core::VERSION.to_string(),
            created_unix_ms,
            input: input.to_string(),
        })
    }
}
