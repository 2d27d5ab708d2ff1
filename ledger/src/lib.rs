// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
pub mod config;
pub mod errors;
pub mod block;
pub mod chain;
pub mod integrity;
pub mod projection;
pub mod persistence;
pub mod nodes;
pub mod ledger;
pub mod telemetry;

pub use block::{Block, BlockPayload, BlockRecord, NodeLedgerRecord};
pub use chain::Chain;
pub use config::LedgerConfig;
pub use errors::{LedgerError, Result};
pub use integrity::{IntegrityIssue, IntegrityReport};
pub use ledger::{Ledger, LoadOutcome};
pub use projection::{ChainProjection, DiskProjection, NullProjection};
