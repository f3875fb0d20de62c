use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn bin_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_heartstat"))
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").canonicalize().unwrap()
}

fn fixture_path(name: &str) -> PathBuf {
    repo_root().join("tests/fixtures").join(name)
}

fn tmp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    let dir = std::env::temp_dir()
        .join(format!("heartstat_cli_{}_{}_{}", name, std::process::id(), nanos));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn run_in(cwd: &Path, args: &[&str]) -> Output {
    Command::new(bin_path())
        .current_dir(cwd)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("failed to run {:?} {:?}: {}", bin_path(), args, e))
}

const PLOTS: [&str; 5] = [
    "thalach_by_heart_disease.svg",
    "age_by_heart_disease.svg",
    "trestbps_by_heart_disease.svg",
    "chol_by_heart_disease.svg",
    "thalach_by_cp.svg",
];

#[test]
fn analyze_prints_results_and_writes_plots_and_report() {
    let input = fixture_path("heart_disease_sample.csv");
    assert!(input.exists(), "missing fixture: {}", input.display());
    let dir = tmp_dir("analyze");
    let plots = dir.join("plots");
    let report = dir.join("report.json");

    let out = run_in(
        &dir,
        &[
            "analyze",
            "--input",
            input.to_string_lossy().as_ref(),
            "--plots-dir",
            plots.to_string_lossy().as_ref(),
            "--output",
            report.to_string_lossy().as_ref(),
        ],
    );
    assert!(
        out.status.success(),
        "analyze should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );

    let stdout = String::from_utf8_lossy(&out.stdout);
    for needle in [
        "typical angina",
        "p-value for `thalach` two-sample t-test:",
        "p-value for `age` two-sample t-test:",
        "p-value for `trestbps` two-sample t-test:",
        "p-value for `chol` two-sample t-test:",
        "p-value for ANOVA:",
        "Multiple Comparison of Means - Tukey HSD, FWER=0.05",
        "p-value for chi-square test:",
    ] {
        assert!(stdout.contains(needle), "stdout missing {needle:?}:\n{stdout}");
    }

    // Fixed question order.
    let pos = |s: &str| stdout.find(s).unwrap();
    assert!(pos("`thalach` two-sample") < pos("`age` two-sample"));
    assert!(pos("`chol` two-sample") < pos("p-value for ANOVA"));
    assert!(pos("p-value for ANOVA") < pos("Multiple Comparison"));
    assert!(pos("Multiple Comparison") < pos("chi-square"));

    for name in PLOTS {
        let svg = std::fs::read_to_string(plots.join(name))
            .unwrap_or_else(|e| panic!("missing plot {name}: {e}"));
        assert!(svg.starts_with("<svg"), "{name} is not SVG");
    }

    let v: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&report).unwrap()).expect("report JSON");
    assert_eq!(v["schema_version"], "heartstat_report_v0");
    assert_eq!(v["rows"], 50);
    assert!(v["thalach"]["mean_diff"].as_f64().unwrap() < 0.0);
    assert!(v["thalach"]["ttest"]["p_value"].as_f64().unwrap() < 0.05);
    assert_eq!(v["ttests"].as_array().unwrap().len(), 3);
    assert_eq!(v["anova"]["groups"][0], "typical angina");
    assert_eq!(v["tukey"]["pairs"].as_array().unwrap().len(), 6);
    assert_eq!(v["chi2"]["result"]["dof"], 3);
    assert_eq!(v["plots"].as_array().unwrap().len(), 5);
}

#[test]
fn no_subcommand_runs_analyze_with_defaults() {
    let dir = tmp_dir("default");
    std::fs::copy(fixture_path("heart_disease_sample.csv"), dir.join("heart_disease.csv")).unwrap();

    let out = run_in(&dir, &[]);
    assert!(
        out.status.success(),
        "default run should succeed, stderr={}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert!(String::from_utf8_lossy(&out.stdout).contains("p-value for chi-square test:"));
    for name in PLOTS {
        assert!(dir.join("plots").join(name).exists(), "missing plots/{name}");
    }
}

#[test]
fn missing_value_aborts_with_diagnostic() {
    let dir = tmp_dir("missing");
    let out = run_in(
        &dir,
        &[
            "analyze",
            "--input",
            fixture_path("heart_disease_missing.csv").to_string_lossy().as_ref(),
            "--plots-dir",
            dir.join("plots").to_string_lossy().as_ref(),
        ],
    );
    assert!(!out.status.success(), "missing value must fail the run");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("chol"), "stderr={stderr}");
    assert!(!dir.join("plots").exists());
}

#[test]
fn missing_input_file_fails() {
    let dir = tmp_dir("noinput");
    let out = run_in(&dir, &["analyze", "--input", "does_not_exist.csv"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("does_not_exist.csv"));
}
