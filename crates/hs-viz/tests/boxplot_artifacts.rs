use hs_data::{CategoricalColumn, NumericColumn, read_csv, segment};
use std::path::PathBuf;

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").canonicalize().expect("repo root")
}

#[test]
fn boxplot_artifact_contract_smoke() {
    let table =
        read_csv(&repo_root().join("tests/fixtures/heart_disease_sample.csv")).expect("fixture");
    let by = CategoricalColumn::Cp;
    let groups: Vec<(String, Vec<f64>)> = table
        .levels(by)
        .into_iter()
        .map(|label| {
            let values = segment(&table, NumericColumn::Thalach, by, &label);
            (label, values)
        })
        .collect();

    let art = hs_viz::boxplot_artifact("thalach by cp", "thalach", "cp", &groups).expect("artifact");
    assert_eq!(art.groups.len(), 4);
    assert_eq!(art.groups.iter().map(|g| g.n).sum::<usize>(), table.len());
    for g in &art.groups {
        let (q1, med, q3) = (g.q1.unwrap(), g.median.unwrap(), g.q3.unwrap());
        assert!(q1 <= med && med <= q3, "{}: {q1} {med} {q3}", g.label);
        assert!(g.whisker_low.unwrap() <= q1 && q3 <= g.whisker_high.unwrap());
    }

    let v = serde_json::to_value(&art).expect("json");
    assert_eq!(v["schema_version"], "heartstat_boxplot_v0");
    assert!(v["meta"]["created_unix_ms"].as_u64().unwrap() > 0);
    assert_eq!(v["groups"][0]["label"], "asymptomatic");
}
