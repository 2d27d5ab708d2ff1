// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Merkle Committer
//!
//! Folds an ordered batch of hex digests into one root:
//! - pairs are hashed left to right, the last odd node is paired with itself
//! - empty input has no root
//! - a single leaf is its own root, unhashed
//!
//! The single-leaf rule is part of the on-disk format: block hashes commit to
//! the root, so verification must reproduce it exactly.

use crate::hash::{hash_json, hash_pair, Hash};
use crate::transaction::TransactionRecord;

pub fn merkle_root(leaves: &[Hash]) -> Option<Hash> {
    match leaves.len() {
        0 => None,
        1 => Some(leaves[0].clone()),
        _ => {
            let mut level = leaves.to_vec();
            while level.len() > 1 {
                level = level
                    .chunks(2)
                    .map(|pair| {
                        let left = &pair[0];
                        let right = pair.get(1).unwrap_or(left);
                        hash_pair(left, right)
                    })
                    .collect();
            }
            level.pop()
        }
    }
}

/// One leaf per final price, hashing its JSON rendering.
pub fn transaction_hashes(record: &TransactionRecord) -> serde_json::Result<Vec<Hash>> {
    record.final_prices.iter().map(|price| hash_json(price)).collect()
}

/// Root committed by a block carrying `record`.
pub fn commit(record: &TransactionRecord) -> serde_json::Result<Option<Hash>> {
    Ok(merkle_root(&transaction_hashes(record)?))
}
