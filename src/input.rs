// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Validated market input.
//!
//! The input document carries per-seller vectors; `validate` enforces every
//! precondition the engine relies on and turns it into sellers, params and
//! opening prices.

use serde::{Deserialize, Serialize};

use crate::config::{MAX_SUPPLY_COEFFICIENT, MIN_SUPPLY_COEFFICIENT};
use crate::error::{MarketError, Result};
use crate::types::{MarketParams, Seller};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketInput {
    pub capacities: Vec<f64>,
    pub qualities: Vec<f64>,
    pub production_costs: Vec<f64>,
    pub buyer_demand: f64,
    pub max_profit_percentage: f64,
    pub min_profits: Vec<f64>,
    pub max_change_percentage: f64,
    pub supply_coefficient: f64,
    /// Defaults to the midpoint of each seller's price range.
    #[serde(default)]
    pub initial_prices: Option<Vec<f64>>,
}

/// Output of [`MarketInput::validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct ValidatedMarket {
    pub sellers: Vec<Seller>,
    pub params: MarketParams,
    pub initial_prices: Vec<f64>,
    pub supply_coefficient: f64,
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_nan() || value < min || value > max {
        return Err(MarketError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

fn check_seller(seller: usize, field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value.is_nan() || value < min || value > max {
        return Err(MarketError::SellerOutOfRange {
            seller,
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

impl MarketInput {
    pub fn seller_count(&self) -> usize {
        self.capacities.len()
    }

    /// Smallest capacity any seller may offer.
    pub fn min_capacity(&self) -> f64 {
        self.buyer_demand / (self.supply_coefficient * self.seller_count() as f64)
    }

    pub fn validate(&self) -> Result<ValidatedMarket> {
        let n = self.seller_count();
        if n == 0 {
            return Err(MarketError::NoSellers);
        }

        let vectors: [(&'static str, usize); 4] = [
            ("qualities", self.qualities.len()),
            ("production_costs", self.production_costs.len()),
            ("min_profits", self.min_profits.len()),
            (
                "initial_prices",
                self.initial_prices.as_ref().map_or(n, Vec::len),
            ),
        ];
        for (field, found) in vectors {
            if found != n {
                return Err(MarketError::LengthMismatch {
                    field,
                    expected: n,
                    found,
                });
            }
        }

        check_range("buyer_demand", self.buyer_demand, f64::MIN_POSITIVE, f64::INFINITY)?;
        check_range(
            "supply_coefficient",
            self.supply_coefficient,
            MIN_SUPPLY_COEFFICIENT,
            MAX_SUPPLY_COEFFICIENT,
        )?;
        check_range("max_profit_percentage", self.max_profit_percentage, 0.0, 1.0)?;
        check_range("max_change_percentage", self.max_change_percentage, 0.0, 1.0)?;

        let min_capacity = self.min_capacity();
        let mut sellers = Vec::with_capacity(n);
        for i in 0..n {
            check_seller(i, "capacity", self.capacities[i], min_capacity, f64::INFINITY)?;
            check_seller(i, "quality", self.qualities[i], f64::MIN_POSITIVE, f64::INFINITY)?;
            check_seller(
                i,
                "production_cost",
                self.production_costs[i],
                f64::MIN_POSITIVE,
                f64::INFINITY,
            )?;
            let profit_cap =
                self.capacities[i] * self.production_costs[i] * self.max_profit_percentage;
            check_seller(i, "min_profit", self.min_profits[i], 0.0, profit_cap)?;

            sellers.push(Seller::new(
                self.capacities[i],
                self.qualities[i],
                self.production_costs[i],
                self.min_profits[i],
            ));
        }

        let initial_prices = match &self.initial_prices {
            Some(prices) => {
                for (i, (price, seller)) in prices.iter().zip(&sellers).enumerate() {
                    check_seller(
                        i,
                        "initial_price",
                        *price,
                        seller.price_floor(),
                        seller.price_ceiling(self.max_profit_percentage),
                    )?;
                }
                prices.clone()
            }
            None => sellers
                .iter()
                .map(|s| (s.price_floor() + s.price_ceiling(self.max_profit_percentage)) / 2.0)
                .collect(),
        };

        Ok(ValidatedMarket {
            sellers,
            params: MarketParams::new(
                self.buyer_demand,
                self.max_profit_percentage,
                self.max_change_percentage,
            ),
            initial_prices,
            supply_coefficient: self.supply_coefficient,
        })
    }
}
