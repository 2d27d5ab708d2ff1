// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Step sizing for the price update.
//!
//! Two regimes:
//! - warm-up: a per-seller adaptive-moment optimizer smooths the profit gradient
//! - steady state: a market-wide step size driven by price volatility

use crate::config::{
    BASE_MAX_STEP, MAX_STEP_BOOST, MIN_STEP, OPTIMIZER_BETA1, OPTIMIZER_BETA2, OPTIMIZER_EPSILON,
    OPTIMIZER_STEP, VOLATILITY_THRESHOLD,
};

/// First/second moment accumulators owned by a single seller.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OptimizerState {
    m: f64,
    v: f64,
    t: u32,
}

impl OptimizerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one gradient and returns the bias-corrected step size.
    pub fn step(&mut self, gradient: f64) -> f64 {
        self.t += 1;
        self.m = OPTIMIZER_BETA1 * self.m + (1.0 - OPTIMIZER_BETA1) * gradient;
        self.v = OPTIMIZER_BETA2 * self.v + (1.0 - OPTIMIZER_BETA2) * gradient * gradient;

        let t = self.t as i32;
        let m_hat = self.m / (1.0 - OPTIMIZER_BETA1.powi(t));
        let v_hat = self.v / (1.0 - OPTIMIZER_BETA2.powi(t));

        OPTIMIZER_STEP * m_hat / (v_hat.sqrt() + OPTIMIZER_EPSILON)
    }

    /// Zeroes both moments and the step counter.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn steps(&self) -> u32 {
        self.t
    }

    pub fn moments(&self) -> (f64, f64) {
        (self.m, self.v)
    }
}

/// Volatility-adaptive step size for iterations past the warm-up.
///
/// `previous` is the price vector at the start of the iteration, `current`
/// the vector as updated so far. The step stays at the boosted maximum while
/// prices move, and otherwise decays as `1/sqrt(iteration)` down to [`MIN_STEP`].
pub fn volatility_step(iteration: u32, previous: &[f64], current: &[f64]) -> f64 {
    let deltas: Vec<f64> = current
        .iter()
        .zip(previous)
        .map(|(now, before)| now - before)
        .collect();

    let n = deltas.len().max(1) as f64;
    let mean = deltas.iter().sum::<f64>() / n;
    let variance = deltas.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
    let mean_change = mean.abs();
    let std_dev = variance.sqrt();

    let dynamic_max = BASE_MAX_STEP + std_dev.min(MAX_STEP_BOOST);

    let step = if mean_change > VOLATILITY_THRESHOLD || std_dev > VOLATILITY_THRESHOLD {
        dynamic_max
    } else {
        let decay = 1.0 / (iteration.max(1) as f64).sqrt();
        decay.min(dynamic_max).max(MIN_STEP)
    };

    tracing::trace!(
        iteration,
        step,
        mean_change,
        std_dev,
        "volatility-adaptive step"
    );

    step
}
