// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Collusion heuristic over a completed run.
//!
//! Three independent signals, collusion when at least two fire:
//! - too fast: converged in fewer than `min_iterations`
//! - too stable: every seller's mean absolute price change stayed below the threshold
//! - too equal: final shares have a standard deviation below the threshold
//!
//! Pure analysis. Remediation (a moderator re-run) is the caller's choice.

use serde::{Deserialize, Serialize};

use crate::config::{
    COLLUSION_MIN_ITERATIONS, COLLUSION_MIN_SIGNALS, COLLUSION_PRICE_STABILITY,
    COLLUSION_SHARE_DEVIATION,
};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollusionThresholds {
    pub min_iterations: u32,
    pub price_stability: f64,
    pub share_deviation: f64,
}

impl Default for CollusionThresholds {
    fn default() -> Self {
        Self {
            min_iterations: COLLUSION_MIN_ITERATIONS,
            price_stability: COLLUSION_PRICE_STABILITY,
            share_deviation: COLLUSION_SHARE_DEVIATION,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollusionReport {
    pub too_fast: bool,
    pub too_stable: bool,
    pub too_equal: bool,
}

impl CollusionReport {
    pub fn signals(&self) -> usize {
        [self.too_fast, self.too_stable, self.too_equal]
            .iter()
            .filter(|fired| **fired)
            .count()
    }

    pub fn is_collusive(&self) -> bool {
        self.signals() >= COLLUSION_MIN_SIGNALS
    }
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
}

/// Mean absolute iteration-to-iteration price change, per seller.
pub fn mean_price_changes(price_history: &[Vec<f64>]) -> Vec<f64> {
    let Some(first) = price_history.first() else {
        return Vec::new();
    };
    let steps = price_history.len().saturating_sub(1);
    if steps == 0 {
        return vec![0.0; first.len()];
    }

    let mut totals = vec![0.0; first.len()];
    for pair in price_history.windows(2) {
        for (total, (now, before)) in totals.iter_mut().zip(pair[1].iter().zip(&pair[0])) {
            *total += (now - before).abs();
        }
    }
    totals.iter().map(|t| t / steps as f64).collect()
}

pub fn detect(
    price_history: &[Vec<f64>],
    share_history: &[Vec<f64>],
    iterations: u32,
    thresholds: &CollusionThresholds,
) -> CollusionReport {
    let too_fast = iterations < thresholds.min_iterations;

    let too_stable = price_history.len() >= 2
        && mean_price_changes(price_history)
            .iter()
            .all(|change| *change < thresholds.price_stability);

    let too_equal = share_history
        .last()
        .map(|shares| std_dev(shares) < thresholds.share_deviation)
        .unwrap_or(false);

    let report = CollusionReport {
        too_fast,
        too_stable,
        too_equal,
    };

    if report.is_collusive() {
        tracing::warn!(?report, iterations, "possible collusion detected");
    } else if report.signals() > 0 {
        tracing::debug!(?report, "collusion signal below confirmation threshold");
    }

    report
}
