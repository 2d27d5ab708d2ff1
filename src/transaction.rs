// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The unit committed to the ledger once per completed market run.

use serde::{Deserialize, Serialize};

/// Immutable snapshot of a finished run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub final_prices: Vec<f64>,
    pub buyer_shares: Vec<f64>,
    pub iterations: u32,
    pub rewards: Vec<f64>,
    pub total_payment_with_reward: f64,
}

impl TransactionRecord {
    /// Number of sellers that took part in the run.
    pub fn seller_count(&self) -> usize {
        self.final_prices.len()
    }
}
