// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical BLAKE3 Hashing
//!
//! Every hash that ends up in the ledger (transaction leaves, Merkle nodes,
//! block hashes) is a lowercase hex BLAKE3 digest produced here.

use serde::Serialize;

/// Lowercase hex digest, 64 characters.
pub type Hash = String;

/// Length of a hex-encoded digest.
pub const HASH_HEX_LEN: usize = 64;

pub fn hash_bytes(data: &[u8]) -> Hash {
    blake3::hash(data).to_hex().to_string()
}

/// Hashes the concatenation of two hex digests (as text, left first).
pub fn hash_pair(left: &str, right: &str) -> Hash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    hasher.finalize().to_hex().to_string()
}

/// Hashes the compact JSON rendering of `value`.
///
/// Struct fields serialise in declaration order, so callers that need a
/// key-sorted canonical form declare their fields alphabetically.
pub fn hash_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Hash> {
    let bytes = serde_json::to_vec(value)?;
    Ok(hash_bytes(&bytes))
}

pub fn is_hex_digest(candidate: &str) -> bool {
    candidate.len() == HASH_HEX_LEN && candidate.bytes().all(|b| b.is_ascii_hexdigit())
}
