// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Reward Allocator
//!
//! Splits a 1% pool on top of the total payment:
//! - 80% in proportion to normalised utility times normalised supply
//! - 15% by profit share, or by the 80% weights when nobody made a profit
//! - 5% by quality share
//!
//! Every normalisation divides by its sum floored at [`EPSILON`].

use serde::{Deserialize, Serialize};

use crate::config::{
    BASE_REWARD_WEIGHT, EFFICIENCY_REWARD_WEIGHT, EPSILON, FAIRNESS_REWARD_WEIGHT,
    REWARD_POOL_RATE,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardAllocation {
    pub rewards: Vec<f64>,
    pub reward_pool: f64,
    pub total_payment: f64,
    pub total_payment_with_reward: f64,
}

fn normalise(values: &[f64]) -> Vec<f64> {
    let total = values.iter().sum::<f64>().max(EPSILON);
    values.iter().map(|v| v / total).collect()
}

/// Quality-per-price weighted by share, renormalised to sum 1.
///
/// Falls back to a uniform vector when no price is positive or the weighted
/// sum is zero.
pub fn share_weighted_utility(prices: &[f64], shares: &[f64], qualities: &[f64]) -> Vec<f64> {
    let n = prices.len();
    let uniform = || vec![1.0 / n as f64; n];

    if !prices.iter().any(|p| *p > 0.0) {
        return uniform();
    }

    let raw: Vec<f64> = prices
        .iter()
        .zip(shares)
        .zip(qualities)
        .map(|((price, share), quality)| {
            if *price > 0.0 {
                quality / price * share
            } else {
                0.0
            }
        })
        .collect();

    let total: f64 = raw.iter().sum();
    if total > 0.0 {
        raw.iter().map(|u| u / total).collect()
    } else {
        uniform()
    }
}

pub fn allocate(
    prices: &[f64],
    shares: &[f64],
    weighted_utility: &[f64],
    qualities: &[f64],
    production_costs: &[f64],
) -> RewardAllocation {
    let n = prices.len();
    let total_payment: f64 = prices.iter().zip(shares).map(|(p, s)| p * s).sum();

    if total_payment == 0.0 {
        tracing::warn!("no transactions occurred, no rewards distributed");
        return RewardAllocation {
            rewards: vec![0.0; n],
            ..RewardAllocation::default()
        };
    }

    let profits: Vec<f64> = prices
        .iter()
        .zip(shares)
        .zip(production_costs)
        .map(|((price, share), cost)| (price - cost) * share)
        .collect();
    let total_profit: f64 = profits.iter().sum();

    let reward_pool = REWARD_POOL_RATE * total_payment;

    let utility = normalise(weighted_utility);
    let supply = normalise(shares);
    let contribution: Vec<f64> = utility.iter().zip(&supply).map(|(u, s)| u * s).collect();
    let contribution = normalise(&contribution);
    let quality = normalise(qualities);
    let efficiency: Vec<f64> = if total_profit > EPSILON {
        profits.iter().map(|p| p / total_profit).collect()
    } else {
        tracing::debug!("no profit made, efficiency slice follows contribution");
        contribution.clone()
    };

    let rewards = (0..n)
        .map(|i| {
            let base = reward_pool * BASE_REWARD_WEIGHT * contribution[i];
            let profit = reward_pool * EFFICIENCY_REWARD_WEIGHT * efficiency[i];
            let fairness = reward_pool * FAIRNESS_REWARD_WEIGHT * quality[i];
            base + profit + fairness
        })
        .collect();

    let total_payment_with_reward = total_payment + reward_pool;
    tracing::info!(total_payment_with_reward, reward_pool, "rewards distributed");

    RewardAllocation {
        rewards,
        reward_pool,
        total_payment,
        total_payment_with_reward,
    }
}
