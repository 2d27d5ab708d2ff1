// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Blocks and their persisted shapes.
//!
//! The block hash commits to `{index, merkle_root, previous_hash, timestamp}`
//! rendered as compact JSON with keys in sorted order. The payload itself is
//! only covered through its Merkle root.

use saki_market::hash::{hash_json, Hash};
use saki_market::merkle;
use saki_market::TransactionRecord;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::errors::{LedgerError, Result};

pub const GENESIS_MESSAGE: &str = "Genesis Block";
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// What a block carries: a market transaction, or the genesis marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockPayload {
    Market(TransactionRecord),
    Genesis { message: String },
}

impl BlockPayload {
    pub fn genesis() -> Self {
        BlockPayload::Genesis {
            message: GENESIS_MESSAGE.to_string(),
        }
    }

    pub fn record(&self) -> Option<&TransactionRecord> {
        match self {
            BlockPayload::Market(record) => Some(record),
            BlockPayload::Genesis { .. } => None,
        }
    }

    /// Sellers named by the payload; zero for genesis.
    pub fn seller_count(&self) -> usize {
        self.record().map_or(0, TransactionRecord::seller_count)
    }

    /// JSON has no NaN or infinity, so such a payload could not be read back.
    pub fn ensure_finite(&self) -> Result<()> {
        let Some(record) = self.record() else {
            return Ok(());
        };
        let vectors: [(&'static str, &[f64]); 3] = [
            ("final_prices", &record.final_prices),
            ("buyer_shares", &record.buyer_shares),
            ("rewards", &record.rewards),
        ];
        for (field, values) in vectors {
            if !values.iter().all(|v| v.is_finite()) {
                return Err(LedgerError::NonFinite { field });
            }
        }
        if !record.total_payment_with_reward.is_finite() {
            return Err(LedgerError::NonFinite {
                field: "total_payment_with_reward",
            });
        }
        Ok(())
    }

    pub fn merkle_root(&self) -> Result<Option<Hash>> {
        match self {
            BlockPayload::Market(record) => Ok(merkle::commit(record)?),
            BlockPayload::Genesis { .. } => Ok(None),
        }
    }
}

// Field order is the canonical key order.
#[derive(Serialize)]
struct HashInput<'a> {
    index: u64,
    merkle_root: Option<&'a str>,
    previous_hash: &'a str,
    timestamp: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub index: u64,
    pub timestamp: f64,
    pub transactions: BlockPayload,
    pub previous_hash: Hash,
    pub merkle_root: Option<Hash>,
    pub block_hash: Hash,
}

/// Entry of the chain file and content of `Block_{index}/block_data.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub index: u64,
    pub timestamp: f64,
    pub transactions: BlockPayload,
    pub previous_hash: Hash,
    pub block_hash: Hash,
}

/// Per-seller mirror entry, `Node_{i}_ledger/block_{index}_ledger.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeLedgerRecord {
    pub index: u64,
    pub transactions: BlockPayload,
    pub block_hash: Hash,
}

pub fn now_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs_f64())
        .unwrap_or_default()
}

impl Block {
    /// Builds a sealed block: merkle root from the payload, hash over the header.
    pub fn new(index: u64, timestamp: f64, transactions: BlockPayload, previous_hash: Hash) -> Result<Self> {
        transactions.ensure_finite()?;
        let merkle_root = transactions.merkle_root()?;
        let block_hash = Self::compute_hash(index, timestamp, merkle_root.as_deref(), &previous_hash)?;
        Ok(Self {
            index,
            timestamp,
            transactions,
            previous_hash,
            merkle_root,
            block_hash,
        })
    }

    pub fn genesis(timestamp: f64) -> Result<Self> {
        Self::new(0, timestamp, BlockPayload::genesis(), GENESIS_PREVIOUS_HASH.to_string())
    }

    pub fn compute_hash(
        index: u64,
        timestamp: f64,
        merkle_root: Option<&str>,
        previous_hash: &str,
    ) -> Result<Hash> {
        let input = HashInput {
            index,
            merkle_root,
            previous_hash,
            timestamp,
        };
        Ok(hash_json(&input)?)
    }

    /// Hash of the block as it stands now, merkle root re-derived from the payload.
    pub fn recompute_hash(&self) -> Result<Hash> {
        let merkle_root = self.transactions.merkle_root()?;
        Self::compute_hash(self.index, self.timestamp, merkle_root.as_deref(), &self.previous_hash)
    }

    pub fn is_hash_valid(&self) -> Result<bool> {
        Ok(self.recompute_hash()? == self.block_hash)
    }

    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.previous_hash == GENESIS_PREVIOUS_HASH
    }

    /// Rebuilds a block read from disk. The stored hash is kept verbatim so
    /// that tampering stays visible to verification.
    pub fn from_record(record: BlockRecord) -> Result<Self> {
        let merkle_root = record.transactions.merkle_root()?;
        Ok(Self {
            index: record.index,
            timestamp: record.timestamp,
            transactions: record.transactions,
            previous_hash: record.previous_hash,
            merkle_root,
            block_hash: record.block_hash,
        })
    }

    pub fn to_record(&self) -> BlockRecord {
        BlockRecord {
            index: self.index,
            timestamp: self.timestamp,
            transactions: self.transactions.clone(),
            previous_hash: self.previous_hash.clone(),
            block_hash: self.block_hash.clone(),
        }
    }

    pub fn node_record(&self) -> NodeLedgerRecord {
        NodeLedgerRecord {
            index: self.index,
            transactions: self.transactions.clone(),
            block_hash: self.block_hash.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saki_market::hash::is_hex_digest;

    fn record() -> TransactionRecord {
        TransactionRecord {
            final_prices: vec![15.0, 15.0],
            buyer_shares: vec![50.0, 50.0],
            iterations: 3,
            rewards: vec![7.5, 7.5],
            total_payment_with_reward: 1515.0,
        }
    }

    #[test]
    fn test_genesis_shape() {
        let genesis = Block::genesis(1.0).unwrap();
        assert_eq!(genesis.index, 0);
        assert_eq!(genesis.previous_hash, "0");
        assert_eq!(genesis.merkle_root, None);
        assert!(genesis.is_genesis());
        assert!(is_hex_digest(&genesis.block_hash));
        assert!(genesis.is_hash_valid().unwrap());
    }

    #[test]
    fn test_hash_uses_sorted_header_keys() {
        let block = Block::new(1, 2.5, BlockPayload::Market(record()), "ab".into()).unwrap();
        let root = block.merkle_root.clone().unwrap();
        let expected = saki_market::hash::hash_bytes(
            format!(r#"{{"index":1,"merkle_root":"{root}","previous_hash":"ab","timestamp":2.5}}"#).as_bytes(),
        );
        assert_eq!(block.block_hash, expected);
    }

    #[test]
    fn test_payload_round_trips_untagged() {
        let genesis: BlockPayload = serde_json::from_str(r#"{"message":"Genesis Block"}"#).unwrap();
        assert_eq!(genesis, BlockPayload::genesis());

        let json = serde_json::to_string(&BlockPayload::Market(record())).unwrap();
        assert!(json.starts_with(r#"{"final_prices""#));
        let back: BlockPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seller_count(), 2);
    }

    #[test]
    fn test_from_record_keeps_stored_hash() {
        let block = Block::new(1, 2.0, BlockPayload::Market(record()), "ab".into()).unwrap();
        let mut stored = block.to_record();
        stored.block_hash = "f".repeat(64);

        let restored = Block::from_record(stored).unwrap();
        assert_eq!(restored.block_hash, "f".repeat(64));
        assert_eq!(restored.merkle_root, block.merkle_root);
        assert!(!restored.is_hash_valid().unwrap());
    }
}
