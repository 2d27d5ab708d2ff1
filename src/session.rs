// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Market Session
//!
//! One complete run, start to ledger-ready record:
//! ```text
//! Engine::run
//! ↓
//! collusion::detect ── collusive? ──> inject moderator, Engine::run again
//! ↓
//! reward::share_weighted_utility → reward::allocate
//! ↓
//! TransactionRecord
//! ```

use serde::{Deserialize, Serialize};

use crate::collusion::{self, CollusionReport, CollusionThresholds};
use crate::engine::{Engine, EquilibriumOutcome};
use crate::error::Result;
use crate::reward::{self, RewardAllocation};
use crate::transaction::TransactionRecord;
use crate::types::{MarketParams, Seller};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Re-run with a moderator seller when collusion is flagged.
    pub moderate_collusion: bool,
    pub thresholds: CollusionThresholds,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            moderate_collusion: true,
            thresholds: CollusionThresholds::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarketSession {
    /// Participants of the final run, moderator last when injected.
    pub sellers: Vec<Seller>,
    pub outcome: EquilibriumOutcome,
    /// Collusion report of the first run.
    pub collusion: CollusionReport,
    /// Price the moderator was anchored at, when one was injected.
    pub moderator_price: Option<f64>,
    pub weighted_utility: Vec<f64>,
    pub rewards: RewardAllocation,
}

impl MarketSession {
    pub fn moderated(&self) -> bool {
        self.moderator_price.is_some()
    }

    pub fn transaction_record(&self) -> TransactionRecord {
        TransactionRecord {
            final_prices: self.outcome.final_prices.clone(),
            buyer_shares: self.outcome.final_shares.clone(),
            iterations: self.outcome.iterations,
            rewards: self.rewards.rewards.clone(),
            total_payment_with_reward: self.rewards.total_payment_with_reward,
        }
    }
}

pub fn run_session(
    sellers: &[Seller],
    params: MarketParams,
    initial_prices: &[f64],
    options: &SessionOptions,
) -> Result<MarketSession> {
    let mut participants = sellers.to_vec();
    let mut outcome = Engine::new(&participants, params)?.run(initial_prices, None)?;

    let report = collusion::detect(
        &outcome.price_history,
        &outcome.share_history,
        outcome.iterations,
        &options.thresholds,
    );

    let mut moderator_price = None;
    if report.is_collusive() && options.moderate_collusion {
        let moderator = Seller::moderator_for(&participants);
        let anchor = moderator.moderator_price(&outcome.final_prices);
        tracing::info!(
            capacity = moderator.capacity,
            quality = moderator.quality,
            cost = moderator.production_cost,
            anchor,
            "collusion confirmed, re-running with moderator seller"
        );

        let mut reopening = outcome.final_prices.clone();
        reopening.push(anchor);
        participants.push(moderator);

        outcome = Engine::new(&participants, params)?.run(&reopening, Some(anchor))?;
        moderator_price = Some(anchor);
    }

    let qualities: Vec<f64> = participants.iter().map(|s| s.quality).collect();
    let costs: Vec<f64> = participants.iter().map(|s| s.production_cost).collect();

    let weighted_utility =
        reward::share_weighted_utility(&outcome.final_prices, &outcome.final_shares, &qualities);
    let rewards = reward::allocate(
        &outcome.final_prices,
        &outcome.final_shares,
        &weighted_utility,
        &qualities,
        &costs,
    );

    Ok(MarketSession {
        sellers: participants,
        outcome,
        collusion: report,
        moderator_price,
        weighted_utility,
        rewards,
    })
}
