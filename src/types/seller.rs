// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Seller attributes.

use serde::{Deserialize, Serialize};

use crate::config::{MODERATOR_COST_MARKUP, MODERATOR_PRICE_DISCOUNT, MODERATOR_QUALITY_CAP};

/// Immutable per-run attributes of a market participant.
///
/// The seller's price is not stored here: the engine owns the price vector
/// and mutates it every iteration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub capacity: f64,
    pub quality: f64,
    pub production_cost: f64,
    pub min_profit: f64,
}

impl Seller {
    pub fn new(capacity: f64, quality: f64, production_cost: f64, min_profit: f64) -> Self {
        Self {
            capacity,
            quality,
            production_cost,
            min_profit,
        }
    }

    /// Lowest admissible price.
    pub fn price_floor(&self) -> f64 {
        self.production_cost
    }

    /// Highest admissible price for the given profit margin.
    pub fn price_ceiling(&self, max_profit_percentage: f64) -> f64 {
        self.production_cost * (1.0 + max_profit_percentage)
    }

    /// Clamps `price` into `[floor, ceiling]`.
    pub fn clamp_price(&self, price: f64, max_profit_percentage: f64) -> f64 {
        price
            .max(self.price_floor())
            .min(self.price_ceiling(max_profit_percentage))
    }

    pub fn profit(&self, price: f64, share: f64) -> f64 {
        (price - self.production_cost) * share
    }

    /// Derives the synthetic moderator seller injected after a collusive run.
    ///
    /// Largest capacity, best quality capped below 1, cheapest cost, no profit floor.
    pub fn moderator_for(sellers: &[Seller]) -> Seller {
        let capacity = sellers.iter().map(|s| s.capacity).fold(0.0, f64::max);
        let quality = sellers
            .iter()
            .map(|s| s.quality)
            .fold(0.0, f64::max)
            .min(MODERATOR_QUALITY_CAP);
        let production_cost = sellers
            .iter()
            .map(|s| s.production_cost)
            .fold(f64::INFINITY, f64::min);

        Seller {
            capacity,
            quality,
            production_cost,
            min_profit: 0.0,
        }
    }

    /// Anchor price offered by a moderator against the previous run's prices.
    pub fn moderator_price(&self, final_prices: &[f64]) -> f64 {
        let lowest = final_prices.iter().copied().fold(f64::INFINITY, f64::min);
        (lowest * MODERATOR_PRICE_DISCOUNT).min(self.production_cost * MODERATOR_COST_MARKUP)
    }
}
