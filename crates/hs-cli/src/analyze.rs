use anyhow::{Context, Result};
use std::path::Path;

use hs_core::Decision;
use hs_data::{CategoricalColumn, NumericColumn, PatientTable, describe, segment};
use hs_inference::{chi2_contingency, f_oneway, pairwise_tukeyhsd, ttest_ind};

use crate::report::{
    AnalysisReport, AnovaSection, Chi2Section, ReportMeta, ThalachComparison, VariableTTest,
};
use crate::{load_table, load_viz_config, render_boxplot, write_json};

const PRESENCE: &str = "presence";
const ABSENCE: &str = "absence";

/// ANOVA group order for chest-pain types.
const CHEST_PAIN_ORDER: [&str; 4] =
    ["typical angina", "asymptomatic", "non-anginal pain", "atypical angina"];

/// Quantitative predictors checked after `thalach`.
const OTHER_PREDICTORS: [NumericColumn; 3] =
    [NumericColumn::Age, NumericColumn::Trestbps, NumericColumn::Chol];

/// Run every question in order. Any failing step aborts the run.
pub fn cmd_analyze(
    input: &Path,
    plots_dir: &Path,
    alpha: f64,
    viz_config: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let table = load_table(input)?;
    let config = load_viz_config(viz_config)?;
    let mut plots = Vec::new();
    let mut plot = |value: NumericColumn, by: CategoricalColumn| -> Result<()> {
        let path = plots_dir.join(format!("{}_by_{}.svg", value, by));
        render_boxplot(&table, value, by, &path, &config)?;
        plots.push(path.display().to_string());
        Ok(())
    };

    println!("{}", table.head_view(5));
    println!();

    // -----------------------------------------------------------------------
    // thalach vs heart disease
    // -----------------------------------------------------------------------

    plot(NumericColumn::Thalach, CategoricalColumn::HeartDisease)?;
    let thalach = compare_thalach(&table)?;
    println!("mean difference in `thalach` (presence - absence): {}", thalach.mean_diff);
    println!("median difference in `thalach` (presence - absence): {}", thalach.median_diff);
    println!(
        "p-value for `thalach` two-sample t-test: {}",
        format_p_value(thalach.ttest.p_value)
    );

    // -----------------------------------------------------------------------
    // age, trestbps, chol vs heart disease
    // -----------------------------------------------------------------------

    let mut ttests = Vec::with_capacity(OTHER_PREDICTORS.len());
    for value in OTHER_PREDICTORS {
        plot(value, CategoricalColumn::HeartDisease)?;
        let ttest = heart_disease_ttest(&table, value)?;
        println!(
            "p-value for `{}` two-sample t-test: {}",
            value,
            format_p_value(ttest.p_value)
        );
        ttests.push(VariableTTest {
            variable: value.name().to_string(),
            reject: Decision::at(ttest.p_value, alpha).is_reject(),
            ttest,
        });
    }

    // -----------------------------------------------------------------------
    // thalach vs chest pain type
    // -----------------------------------------------------------------------

    plot(NumericColumn::Thalach, CategoricalColumn::Cp)?;
    let groups: Vec<Vec<f64>> = CHEST_PAIN_ORDER
        .iter()
        .map(|cp| segment(&table, NumericColumn::Thalach, CategoricalColumn::Cp, cp))
        .collect();
    let slices: Vec<&[f64]> = groups.iter().map(Vec::as_slice).collect();
    let anova = f_oneway(&slices).context("ANOVA of thalach across chest pain types")?;
    println!("p-value for ANOVA: {}", format_p_value(anova.p_value));

    let tukey = pairwise_tukeyhsd(
        &table.numeric(NumericColumn::Thalach),
        &table.categorical(CategoricalColumn::Cp),
        alpha,
    )
    .context("Tukey HSD of thalach across chest pain types")?;
    println!("{}", tukey);

    // -----------------------------------------------------------------------
    // chest pain type vs heart disease
    // -----------------------------------------------------------------------

    let ct = hs_data::crosstab(&table, CategoricalColumn::Cp, CategoricalColumn::HeartDisease);
    tracing::debug!(table = %ct, "contingency table");
    let chi2 = chi2_contingency(&ct.counts, true).context("chi-square test of cp x heart_disease")?;
    println!("p-value for chi-square test: {}", format_p_value(chi2.p_value));

    tracing::info!(plots = plots.len(), dir = %plots_dir.display(), "analysis complete");

    if let Some(path) = output {
        let report = AnalysisReport {
            schema_version: "heartstat_report_v0".to_string(),
            meta: ReportMeta::new(&input.display().to_string())?,
            rows: table.len(),
            alpha,
            thalach,
            ttests,
            anova: AnovaSection {
                value: NumericColumn::Thalach.name().to_string(),
                groups: CHEST_PAIN_ORDER.iter().map(|s| s.to_string()).collect(),
                reject: Decision::at(anova.p_value, alpha).is_reject(),
                result: anova,
            },
            tukey,
            chi2: Chi2Section {
                reject: Decision::at(chi2.p_value, alpha).is_reject(),
                table: ct,
                result: chi2,
            },
            plots,
        };
        write_json(Some(path), serde_json::to_value(&report)?)?;
    }
    Ok(())
}

fn compare_thalach(table: &PatientTable) -> Result<ThalachComparison> {
    let by = CategoricalColumn::HeartDisease;
    let hd = segment(table, NumericColumn::Thalach, by, PRESENCE);
    let no_hd = segment(table, NumericColumn::Thalach, by, ABSENCE);
    let presence = describe(&hd);
    let absence = describe(&no_hd);
    let ttest = ttest_ind(&hd, &no_hd, true).context("t-test of thalach by heart_disease")?;
    Ok(ThalachComparison {
        mean_diff: presence.mean - absence.mean,
        median_diff: presence.median - absence.median,
        presence,
        absence,
        ttest,
    })
}

fn heart_disease_ttest(
    table: &PatientTable,
    value: NumericColumn,
) -> Result<hs_inference::TTestResult> {
    let by = CategoricalColumn::HeartDisease;
    let hd = segment(table, value, by, PRESENCE);
    let no_hd = segment(table, value, by, ABSENCE);
    ttest_ind(&hd, &no_hd, true).with_context(|| format!("t-test of {} by heart_disease", value))
}

/// Plain decimal down to 1e-4, scientific notation below.
fn format_p_value(p: f64) -> String {
    if p == 0.0 || p >= 1e-4 { format!("{}", p) } else { format!("{:e}", p) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn p_value_formatting() {
        assert_eq!(format_p_value(0.5), "0.5");
        assert_eq!(format_p_value(0.0085), "0.0085");
        assert_eq!(format_p_value(3.5e-14), "3.5e-14");
        assert_eq!(format_p_value(0.0), "0");
    }
}
