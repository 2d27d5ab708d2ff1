// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Market tuning constants.

/// Default convergence threshold on per-seller price deltas.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Default upper bound on equilibrium iterations.
pub const DEFAULT_MAX_ITERATIONS: u32 = 1000;

/// Iterations (inclusive) that size steps with the adaptive-moment optimizer.
/// Later iterations switch to the volatility-adaptive step size.
pub const OPTIMIZER_WARMUP_ITERATIONS: u32 = 10;

/// Adaptive-moment optimizer parameters.
pub const OPTIMIZER_STEP: f64 = 0.05;
pub const OPTIMIZER_BETA1: f64 = 0.9;
pub const OPTIMIZER_BETA2: f64 = 0.999;
pub const OPTIMIZER_EPSILON: f64 = 1e-8;

/// Volatility-adaptive step size bounds.
pub const MIN_STEP: f64 = 0.005;
pub const BASE_MAX_STEP: f64 = 0.05;
pub const MAX_STEP_BOOST: f64 = 0.05;
pub const VOLATILITY_THRESHOLD: f64 = 0.1;

/// Lower bound for the stagnation reset window.
pub const MIN_STAGNATION_WINDOW: u32 = 10;

/// Price increment used while raising a seller towards its profit floor.
pub const MIN_PROFIT_INCREMENT: f64 = 0.5;

/// Upper bound on profit-floor increments within a single update.
pub const MAX_MIN_PROFIT_STEPS: u32 = 10_000;

/// Numerical floor used by every normalisation.
pub const EPSILON: f64 = 1e-9;

/// Share of total payment paid out as rewards on top of the payment.
pub const REWARD_POOL_RATE: f64 = 0.01;

/// Reward pool split: utility-weighted supply, profit efficiency, quality.
pub const BASE_REWARD_WEIGHT: f64 = 0.80;
pub const EFFICIENCY_REWARD_WEIGHT: f64 = 0.15;
pub const FAIRNESS_REWARD_WEIGHT: f64 = 0.05;

/// Collusion heuristic defaults.
pub const COLLUSION_MIN_ITERATIONS: u32 = 10;
pub const COLLUSION_PRICE_STABILITY: f64 = 0.01;
pub const COLLUSION_SHARE_DEVIATION: f64 = 0.05;
pub const COLLUSION_MIN_SIGNALS: usize = 2;

/// Moderator seller derivation.
pub const MODERATOR_QUALITY_CAP: f64 = 0.99;
pub const MODERATOR_PRICE_DISCOUNT: f64 = 0.70;
pub const MODERATOR_COST_MARKUP: f64 = 1.05;

/// Supply coefficient bounds accepted by input validation.
pub const MIN_SUPPLY_COEFFICIENT: f64 = 0.2;
pub const MAX_SUPPLY_COEFFICIENT: f64 = 1.0;
