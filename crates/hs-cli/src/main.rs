//! heartstat CLI

mod analyze;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hs_data::{CategoricalColumn, NumericColumn, PatientTable, segment};
use hs_viz_render::config::VizConfig;
use std::path::{Path, PathBuf};

const DEFAULT_INPUT: &str = "heart_disease.csv";
const DEFAULT_PLOTS_DIR: &str = "plots";
const DEFAULT_ALPHA: f64 = 0.05;

#[derive(Parser)]
#[command(name = "heartstat")]
#[command(about = "heartstat - hypothesis tests on the Cleveland heart-disease data")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    /// Defaults to `analyze` with default options.
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis: preview, box plots, t-tests, ANOVA, Tukey HSD, chi-square
    Analyze {
        /// Input CSV
        #[arg(short, long, default_value = DEFAULT_INPUT)]
        input: PathBuf,

        /// Directory for SVG box plots
        #[arg(long, default_value = DEFAULT_PLOTS_DIR)]
        plots_dir: PathBuf,

        /// Significance level
        #[arg(long, default_value_t = DEFAULT_ALPHA)]
        alpha: f64,

        /// YAML visual configuration
        #[arg(long)]
        viz_config: Option<PathBuf>,

        /// Also write a JSON report of every result to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Two-sample t-test of a numeric column between two categories
    Ttest {
        /// Input CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Numeric column
        #[arg(long)]
        value: NumericColumn,

        /// Grouping column
        #[arg(long)]
        by: CategoricalColumn,

        /// First category
        #[arg(long)]
        a: String,

        /// Second category
        #[arg(long)]
        b: String,

        /// Welch's test (unequal variances) instead of Student's
        #[arg(long)]
        welch: bool,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// One-way ANOVA of a numeric column across every category
    Anova {
        /// Input CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Numeric column
        #[arg(long)]
        value: NumericColumn,

        /// Grouping column
        #[arg(long)]
        by: CategoricalColumn,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Tukey HSD pairwise comparison of a numeric column across categories
    Tukey {
        /// Input CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Numeric column
        #[arg(long)]
        value: NumericColumn,

        /// Grouping column
        #[arg(long)]
        by: CategoricalColumn,

        /// Family-wise error rate
        #[arg(long, default_value_t = DEFAULT_ALPHA)]
        alpha: f64,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Chi-square test of independence between two categorical columns
    Chi2 {
        /// Input CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Row variable
        #[arg(long)]
        rows: CategoricalColumn,

        /// Column variable
        #[arg(long)]
        cols: CategoricalColumn,

        /// Disable Yates' continuity correction on 2x2 tables
        #[arg(long)]
        no_correction: bool,

        /// Output file for results (pretty JSON). Defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a grouped box plot to SVG
    Boxplot {
        /// Input CSV
        #[arg(short, long)]
        input: PathBuf,

        /// Numeric column (x axis)
        #[arg(long)]
        value: NumericColumn,

        /// Grouping column (one box per category)
        #[arg(long)]
        by: CategoricalColumn,

        /// Output SVG file
        #[arg(short, long)]
        output: PathBuf,

        /// YAML visual configuration
        #[arg(long)]
        viz_config: Option<PathBuf>,
    },

    /// Print version
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some(command) = cli.command else {
        return analyze::cmd_analyze(
            Path::new(DEFAULT_INPUT),
            Path::new(DEFAULT_PLOTS_DIR),
            DEFAULT_ALPHA,
            None,
            None,
        );
    };

    match command {
        Commands::Analyze { input, plots_dir, alpha, viz_config, output } => {
            analyze::cmd_analyze(&input, &plots_dir, alpha, viz_config.as_deref(), output.as_deref())
        }
        Commands::Ttest { input, value, by, a, b, welch, output } => {
            cmd_ttest(&input, value, by, &a, &b, welch, output.as_deref())
        }
        Commands::Anova { input, value, by, output } => {
            cmd_anova(&input, value, by, output.as_deref())
        }
        Commands::Tukey { input, value, by, alpha, output } => {
            cmd_tukey(&input, value, by, alpha, output.as_deref())
        }
        Commands::Chi2 { input, rows, cols, no_correction, output } => {
            cmd_chi2(&input, rows, cols, !no_correction, output.as_deref())
        }
        Commands::Boxplot { input, value, by, output, viz_config } => {
            let table = load_table(&input)?;
            let config = load_viz_config(viz_config.as_deref())?;
            render_boxplot(&table, value, by, &output, &config)
        }
        Commands::Version => {
            println!("heartstat {}", hs_core::VERSION);
            Ok(())
        }
    }
}

fn load_table(input: &Path) -> Result<PatientTable> {
    hs_data::read_csv(input).with_context(|| format!("failed to load {}", input.display()))
}

fn load_viz_config(path: Option<&Path>) -> Result<VizConfig> {
    let yaml = match path {
        Some(p) => Some(
            std::fs::read_to_string(p)
                .with_context(|| format!("failed to read viz config {}", p.display()))?,
        ),
        None => None,
    };
    Ok(hs_viz_render::config::resolve_config(yaml.as_deref())?)
}

/// `(label, values)` for every level of `by`, labels sorted.
fn groups_by(
    table: &PatientTable,
    value: NumericColumn,
    by: CategoricalColumn,
) -> Vec<(String, Vec<f64>)> {
    table
        .levels(by)
        .into_iter()
        .map(|label| {
            let values = segment(table, value, by, &label);
            (label, values)
        })
        .collect()
}

/// Build and render the `value` by `by` box plot to `path`.
fn render_boxplot(
    table: &PatientTable,
    value: NumericColumn,
    by: CategoricalColumn,
    path: &Path,
    config: &VizConfig,
) -> Result<()> {
    let groups = groups_by(table, value, by);
    let title = format!("{} by {}", value, by);
    let artifact = hs_viz::boxplot_artifact(&title, value.name(), by.name(), &groups)?;
    let json = serde_json::to_string(&artifact)?;
    hs_viz_render::render_to_file(&json, "boxplot", path, config)
        .with_context(|| format!("failed to render {}", path.display()))?;
    tracing::info!(path = %path.display(), groups = groups.len(), "box plot written");
    Ok(())
}

fn cmd_ttest(
    input: &Path,
    value: NumericColumn,
    by: CategoricalColumn,
    a: &str,
    b: &str,
    welch: bool,
    output: Option<&Path>,
) -> Result<()> {
    let table = load_table(input)?;
    let xs = segment(&table, value, by, a);
    let ys = segment(&table, value, by, b);
    let r = hs_inference::ttest_ind(&xs, &ys, !welch)
        .with_context(|| format!("t-test of {value} between {by}={a} and {by}={b}"))?;

    write_json(
        output,
        serde_json::json!({
            "test": if welch { "welch_t" } else { "student_t" },
            "value": value.name(),
            "by": by.name(),
            "a": { "label": a, "n": xs.len(), "mean": r.mean_a },
            "b": { "label": b, "n": ys.len(), "mean": r.mean_b },
            "statistic": r.statistic,
            "p_value": r.p_value,
            "df": r.df,
        }),
    )
}

fn cmd_anova(
    input: &Path,
    value: NumericColumn,
    by: CategoricalColumn,
    output: Option<&Path>,
) -> Result<()> {
    let table = load_table(input)?;
    let groups = groups_by(&table, value, by);
    let slices: Vec<&[f64]> = groups.iter().map(|(_, v)| v.as_slice()).collect();
    let r = hs_inference::f_oneway(&slices)
        .with_context(|| format!("ANOVA of {value} across {by}"))?;

    let labels: Vec<&str> = groups.iter().map(|(l, _)| l.as_str()).collect();
    write_json(
        output,
        serde_json::json!({
            "test": "one_way_anova",
            "value": value.name(),
            "by": by.name(),
            "groups": labels,
            "statistic": r.statistic,
            "p_value": r.p_value,
            "df_between": r.df_between,
            "df_within": r.df_within,
            "ss_between": r.ss_between,
            "ss_within": r.ss_within,
        }),
    )
}

fn cmd_tukey(
    input: &Path,
    value: NumericColumn,
    by: CategoricalColumn,
    alpha: f64,
    output: Option<&Path>,
) -> Result<()> {
    let table = load_table(input)?;
    let r = hs_inference::pairwise_tukeyhsd(&table.numeric(value), &table.categorical(by), alpha)
        .with_context(|| format!("Tukey HSD of {value} across {by}"))?;

    let mut v = serde_json::to_value(&r)?;
    v["test"] = "tukey_hsd".into();
    v["value"] = value.name().into();
    v["by"] = by.name().into();
    write_json(output, v)
}

fn cmd_chi2(
    input: &Path,
    rows: CategoricalColumn,
    cols: CategoricalColumn,
    correction: bool,
    output: Option<&Path>,
) -> Result<()> {
    let table = load_table(input)?;
    let ct = hs_data::crosstab(&table, rows, cols);
    let r = hs_inference::chi2_contingency(&ct.counts, correction)
        .with_context(|| format!("chi-square test of {rows} x {cols}"))?;

    write_json(
        output,
        serde_json::json!({
            "test": "chi2_contingency",
            "table": ct,
            "statistic": r.statistic,
            "p_value": r.p_value,
            "dof": r.dof,
            "expected": r.expected,
            "correction_applied": r.correction_applied,
        }),
    )
}

fn write_json(output: Option<&Path>, value: serde_json::Value) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&value)?)?;
    } else {
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}
