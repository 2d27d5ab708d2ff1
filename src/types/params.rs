//! Market-wide parameters.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE, MIN_STAGNATION_WINDOW};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketParams {
    pub buyer_demand: f64,
    pub max_profit_percentage: f64,
    pub max_change_percentage: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl MarketParams {
    pub fn new(buyer_demand: f64, max_profit_percentage: f64, max_change_percentage: f64) -> Self {
        Self {
            buyer_demand,
            max_profit_percentage,
            max_change_percentage,
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Consecutive quiet iterations after which every optimizer is reset.
    pub fn stagnation_window(&self) -> u32 {
        (self.max_iterations / 20).max(MIN_STAGNATION_WINDOW)
    }
}
