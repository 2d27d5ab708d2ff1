// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Equilibrium Engine
//!
//! Iterates price updates until the market settles or the iteration budget
//! runs out.
//!
//! # Per-iteration protocol
//! ```text
//! utility scores (quality / price * capacity)
//! ↓
//! allocation (normalised weights * demand, capped by capacity)
//! ↓
//! per seller: gradient → step size → candidate price
//! ↓
//! bounded-rate clamp → profitability clamp → profit-floor raise
//! ↓
//! history snapshot, stagnation bookkeeping, convergence check
//! ```
//!
//! # Invariants
//! - `share[i] <= capacity[i]` in every snapshot
//! - `price[i]` stays inside `[cost, cost * (1 + max_profit_percentage)]`
//! - `price_history.len() == share_history.len() == iterations + 1`

use serde::{Deserialize, Serialize};

use crate::config::{MAX_MIN_PROFIT_STEPS, MIN_PROFIT_INCREMENT, OPTIMIZER_WARMUP_ITERATIONS};
use crate::error::{MarketError, Result};
use crate::optimizer::{volatility_step, OptimizerState};
use crate::types::{History, MarketParams, Seller};

/// Everything a run produces.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquilibriumOutcome {
    pub final_prices: Vec<f64>,
    pub final_shares: Vec<f64>,
    /// Index 0 holds the initial prices.
    pub price_history: History,
    /// Index 0 holds zero shares (no allocation before the first iteration).
    pub share_history: History,
    pub iterations: u32,
    /// Normalised utility weights of the last iteration.
    pub weighted_utility: Vec<f64>,
}

/// Utility-weighted allocation of demand for one price vector.
#[derive(Clone, Debug, PartialEq)]
pub struct Allocation {
    pub weights: Vec<f64>,
    pub shares: Vec<f64>,
}

/// Computes normalised utility weights and the capacity-capped shares.
pub fn allocate(sellers: &[Seller], prices: &[f64], buyer_demand: f64) -> Allocation {
    let n = sellers.len();
    let mut scores: Vec<f64> = sellers
        .iter()
        .zip(prices)
        .map(|(seller, price)| seller.quality / price * seller.capacity)
        .collect();

    let mut total: f64 = scores.iter().sum();
    if total == 0.0 {
        scores = vec![1.0 / n as f64; n];
        total = 1.0;
    }

    let weights: Vec<f64> = scores.iter().map(|score| score / total).collect();
    let shares = weights
        .iter()
        .zip(sellers)
        .map(|(weight, seller)| (weight * buyer_demand).min(seller.capacity))
        .collect();

    Allocation { weights, shares }
}

/// Raises `candidate` in fixed increments until the seller's profit floor is
/// met or the ceiling is passed, then clamps to the ceiling.
///
/// The result can stay below the floor when the ceiling binds first, or when
/// [`MAX_MIN_PROFIT_STEPS`] increments were not enough.
pub fn enforce_min_profit(seller: &Seller, candidate: f64, share: f64, ceiling: f64) -> f64 {
    if seller.profit(candidate, share) >= seller.min_profit {
        return candidate;
    }

    let mut price = candidate;
    let mut steps = 0;
    while seller.profit(price, share) < seller.min_profit {
        price += MIN_PROFIT_INCREMENT;
        steps += 1;
        if price > ceiling || steps >= MAX_MIN_PROFIT_STEPS {
            break;
        }
    }

    let settled = price.min(ceiling);
    if seller.profit(settled, share) < seller.min_profit {
        tracing::debug!(
            price = settled,
            share,
            min_profit = seller.min_profit,
            "profit floor unreachable below the price ceiling"
        );
    }
    settled
}

pub struct Engine<'a> {
    sellers: &'a [Seller],
    params: MarketParams,
}

impl<'a> Engine<'a> {
    pub fn new(sellers: &'a [Seller], params: MarketParams) -> Result<Self> {
        if sellers.is_empty() {
            return Err(MarketError::NoSellers);
        }
        if params.buyer_demand.is_nan() || params.buyer_demand <= 0.0 {
            return Err(MarketError::OutOfRange {
                field: "buyer_demand",
                value: params.buyer_demand,
                min: f64::MIN_POSITIVE,
                max: f64::INFINITY,
            });
        }
        Ok(Self { sellers, params })
    }

    pub fn sellers(&self) -> &[Seller] {
        self.sellers
    }

    pub fn params(&self) -> &MarketParams {
        &self.params
    }

    /// Runs the market to equilibrium.
    ///
    /// With `moderator_price`, the last seller is the moderator and its
    /// opening price is replaced by the supplied value clamped into its range.
    pub fn run(
        &self,
        initial_prices: &[f64],
        moderator_price: Option<f64>,
    ) -> Result<EquilibriumOutcome> {
        let n = self.sellers.len();
        if initial_prices.len() != n {
            return Err(MarketError::LengthMismatch {
                field: "initial_prices",
                expected: n,
                found: initial_prices.len(),
            });
        }

        let MarketParams {
            buyer_demand,
            max_profit_percentage,
            max_change_percentage,
            tolerance,
            max_iterations,
        } = self.params;

        let mut prices = initial_prices.to_vec();
        if let Some(anchor) = moderator_price {
            let moderator = &self.sellers[n - 1];
            prices[n - 1] = moderator.clamp_price(anchor, max_profit_percentage);
            tracing::info!(price = prices[n - 1], "moderator seller placed");
        }

        let mut shares = vec![0.0; n];
        let mut weighted_utility = vec![1.0 / n as f64; n];
        let mut price_history = vec![prices.clone()];
        let mut share_history = vec![shares.clone()];

        let mut optimizers = vec![OptimizerState::new(); n];
        let stagnation_window = self.params.stagnation_window();
        let mut quiet_iterations = 0u32;
        let mut iteration = 0u32;

        while iteration < max_iterations {
            iteration += 1;
            let previous = prices.clone();

            let allocation = allocate(self.sellers, &prices, buyer_demand);
            weighted_utility = allocation.weights;
            shares = allocation.shares;

            for i in 0..n {
                if shares[i] <= 0.0 {
                    continue;
                }
                let seller = &self.sellers[i];
                let gradient = shares[i] - (prices[i] - seller.production_cost);

                let step = if iteration <= OPTIMIZER_WARMUP_ITERATIONS {
                    optimizers[i].step(gradient)
                } else {
                    volatility_step(iteration, &previous, &prices)
                };

                let current = prices[i];
                let max_change = current * max_change_percentage;
                let ceiling = seller.price_ceiling(max_profit_percentage);

                let candidate = (current + step * gradient)
                    .min(current + max_change)
                    .max(current - max_change);
                let candidate = seller.clamp_price(candidate, max_profit_percentage);

                prices[i] = enforce_min_profit(seller, candidate, shares[i], ceiling);
            }

            price_history.push(prices.clone());
            share_history.push(shares.clone());

            let deltas: Vec<f64> = prices
                .iter()
                .zip(&previous)
                .map(|(now, before)| (now - before).abs())
                .collect();

            if deltas.iter().all(|d| *d < tolerance) {
                quiet_iterations += 1;
            } else {
                quiet_iterations = 0;
            }

            if quiet_iterations >= stagnation_window {
                tracing::warn!(iteration, "market stagnant, resetting optimizers");
                optimizers.iter_mut().for_each(OptimizerState::reset);
                quiet_iterations = 0;
            }

            if deltas.iter().all(|d| *d <= tolerance) {
                break;
            }
        }

        tracing::debug!(iterations = iteration, ?weighted_utility, "equilibrium reached");

        Ok(EquilibriumOutcome {
            final_prices: prices,
            final_shares: shares,
            price_history,
            share_history,
            iterations: iteration,
            weighted_utility,
        })
    }
}
