// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! saki-market: a multi-seller electricity market that iterates prices to a
//! constrained equilibrium and produces ledger-ready transaction records.

pub mod config;
pub mod error;
pub mod types;
pub mod optimizer;
pub mod engine;
pub mod collusion;
pub mod reward;
pub mod hash;
pub mod merkle;
pub mod transaction;
pub mod input;
pub mod session;

pub use engine::{Engine, EquilibriumOutcome};
pub use error::{MarketError, MarketResult};
pub use input::{MarketInput, ValidatedMarket};
pub use session::{run_session, MarketSession, SessionOptions};
pub use transaction::TransactionRecord;
pub use types::{MarketParams, Seller};

#[cfg(test)]
pub mod tests;
