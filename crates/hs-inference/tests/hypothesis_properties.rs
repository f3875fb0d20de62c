use hs_core::Decision;
use hs_inference::{chi2_contingency, f_oneway, pairwise_tukeyhsd, ttest_ind};

/// `n` values spread symmetrically around `centre`, so the sample mean is exact.
fn around(centre: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| centre + (i % 10) as f64 - 4.5).collect()
}

#[test]
fn well_separated_means_are_detected_by_every_mean_test() {
    let low = around(150.0, 100);
    let high = around(170.0, 100);

    let t = ttest_ind(&low, &high, true).expect("t-test");
    assert!((t.mean_a - 150.0).abs() < 1e-9);
    assert!((t.mean_b - 170.0).abs() < 1e-9);
    assert!(t.statistic < 0.0);
    assert_eq!(t.test_result().decision(0.05), Decision::Reject);

    let f = f_oneway(&[&low, &high]).expect("anova");
    assert!((f.statistic - t.statistic * t.statistic).abs() < 1e-6 * f.statistic);
    assert_eq!(f.test_result().decision(0.05), Decision::Reject);

    let values: Vec<f64> = low.iter().chain(&high).copied().collect();
    let labels: Vec<&str> = low.iter().map(|_| "low").chain(high.iter().map(|_| "high")).collect();
    let hsd = pairwise_tukeyhsd(&values, &labels, 0.05).expect("tukey");
    assert_eq!(hsd.pairs.len(), 1);
    let pair = &hsd.pairs[0];
    assert_eq!((pair.group1.as_str(), pair.group2.as_str()), ("high", "low"));
    assert!((pair.meandiff + 20.0).abs() < 1e-9);
    assert!(pair.reject);
}

#[test]
fn identical_groups_are_not_rejected() {
    let a = around(140.0, 30);
    let b = around(140.0, 30);
    let c = around(140.0, 30);

    let t = ttest_ind(&a, &b, false).unwrap();
    assert_eq!(t.test_result().decision(0.05), Decision::FailToReject);

    let f = f_oneway(&[&a, &b, &c]).unwrap();
    assert!(f.statistic.abs() < 1e-9);
    assert!(f.p_value > 0.99);
}

#[test]
fn association_in_counts_is_detected() {
    // Rows: chest-pain types, columns: absence / presence.
    let strong = vec![vec![104, 39], vec![9, 41], vec![68, 18], vec![16, 7]];
    let r = chi2_contingency(&strong, true).unwrap();
    assert_eq!(r.dof, 3);
    assert!(!r.correction_applied);
    assert_eq!(r.test_result().decision(0.05), Decision::Reject);

    let flat = vec![vec![40, 40], vec![25, 25], vec![10, 10]];
    let r = chi2_contingency(&flat, true).unwrap();
    assert_eq!(r.test_result().decision(0.05), Decision::FailToReject);
}

#[test]
fn results_serialize_to_json() {
    let t = ttest_ind(&around(1.0, 10), &around(2.0, 10), true).unwrap();
    let v = serde_json::to_value(t).unwrap();
    assert!(v["p_value"].is_number());
    assert_eq!(v["equal_var"], true);

    let r = chi2_contingency(&[vec![5, 7], vec![9, 3]], true).unwrap();
    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["dof"], 1);
    assert_eq!(v["correction_applied"], true);
}
