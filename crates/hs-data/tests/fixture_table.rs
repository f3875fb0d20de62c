use hs_data::{CategoricalColumn, NumericColumn, crosstab, describe, read_csv, segment};
use std::path::PathBuf;

fn repo_root() -> PathBuf {
    // crates/hs-data -> repo root
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").canonicalize().expect("repo root")
}

fn fixture_path(name: &str) -> PathBuf {
    repo_root().join("tests/fixtures").join(name)
}

#[test]
fn sample_fixture_loads_with_expected_shape() {
    let path = fixture_path("heart_disease_sample.csv");
    assert!(path.exists(), "missing fixture: {}", path.display());

    let table = read_csv(&path).expect("load fixture");
    assert_eq!(table.len(), 50);
    assert_eq!(table.levels(CategoricalColumn::HeartDisease), vec!["absence", "presence"]);
    assert_eq!(table.levels(CategoricalColumn::Cp).len(), 4);
    assert_eq!(table.levels(CategoricalColumn::Sex), vec!["female", "male"]);

    let first = &table.head(5)[0];
    assert_eq!(first.age, 63.0);
    assert_eq!(first.cp, "typical angina");
    assert!(first.fbs);
}

#[test]
fn subgroups_partition_the_column() {
    let table = read_csv(&fixture_path("heart_disease_sample.csv")).unwrap();
    let hd = segment(&table, NumericColumn::Thalach, CategoricalColumn::HeartDisease, "presence");
    let no_hd = segment(&table, NumericColumn::Thalach, CategoricalColumn::HeartDisease, "absence");
    assert_eq!(hd.len() + no_hd.len(), table.len());
    assert_eq!(hd.len(), 21);

    // Heart-disease patients reach a lower maximum heart rate in this sample.
    assert!(describe(&hd).mean < describe(&no_hd).mean);
}

#[test]
fn crosstab_totals_match_table() {
    let table = read_csv(&fixture_path("heart_disease_sample.csv")).unwrap();
    let ct = crosstab(&table, CategoricalColumn::Cp, CategoricalColumn::HeartDisease);
    assert_eq!(ct.total(), 50);
    assert_eq!(ct.row_labels[0], "asymptomatic");
    assert_eq!(ct.row_totals().iter().sum::<u64>(), 50);
    assert_eq!(ct.col_totals(), vec![29, 21]);

    let json = serde_json::to_value(&ct).unwrap();
    assert_eq!(json["row_variable"], "cp");
}

#[test]
fn missing_value_fixture_fails_fast() {
    let err = read_csv(&fixture_path("heart_disease_missing.csv")).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("row 2"), "{msg}");
    assert!(msg.contains("chol"), "{msg}");
}
