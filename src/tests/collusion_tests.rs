// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::collusion::{detect, mean_price_changes, std_dev, CollusionReport, CollusionThresholds};

#[test]
fn test_fast_stable_equal_run_is_collusive() {
    let prices = vec![
        vec![10.0, 10.0],
        vec![10.001, 10.002],
        vec![10.002, 10.002],
        vec![10.002, 10.003],
    ];
    let shares = vec![
        vec![0.0, 0.0],
        vec![50.0, 50.0],
        vec![50.0, 50.0],
        vec![50.0, 50.02],
    ];

    let report = detect(&prices, &shares, 3, &CollusionThresholds::default());
    assert!(report.too_fast);
    assert!(report.too_stable);
    assert!(report.too_equal);
    assert!(report.is_collusive());
}

#[test]
fn test_long_volatile_uneven_run_is_clean() {
    let mut prices = vec![vec![10.0, 12.0]];
    let mut shares = vec![vec![0.0, 0.0]];
    for i in 0..20 {
        let bump = if i % 2 == 0 { 0.5 } else { -0.3 };
        let last = prices.last().unwrap().clone();
        prices.push(vec![last[0] + bump, last[1] - bump]);
        shares.push(vec![20.0, 80.0]);
    }

    let report = detect(&prices, &shares, 20, &CollusionThresholds::default());
    assert_eq!(report, CollusionReport::default());
    assert!(!report.is_collusive());
}

#[test]
fn test_single_signal_is_not_collusion() {
    // Fast but volatile and uneven.
    let prices = vec![vec![10.0, 10.0], vec![11.0, 9.0], vec![12.0, 9.5]];
    let shares = vec![vec![0.0, 0.0], vec![30.0, 70.0], vec![25.0, 75.0]];

    let report = detect(&prices, &shares, 2, &CollusionThresholds::default());
    assert_eq!(report.signals(), 1);
    assert!(!report.is_collusive());
}

#[test]
fn test_stability_needs_history() {
    let report = detect(&[vec![10.0]], &[vec![0.0]], 0, &CollusionThresholds::default());
    assert!(!report.too_stable);
}

#[test]
fn test_mean_price_changes_per_seller() {
    let history = vec![vec![1.0, 5.0], vec![2.0, 5.0], vec![1.0, 6.0]];
    assert_eq!(mean_price_changes(&history), vec![1.0, 0.5]);
    assert!(mean_price_changes(&[]).is_empty());
}

#[test]
fn test_std_dev_population() {
    assert_eq!(std_dev(&[]), 0.0);
    assert!((std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]) - 2.0).abs() < 1e-12);
}
