// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Chain verification: every hash recomputed, every link checked.

use saki_market::hash::Hash;
use std::fmt;

use crate::block::Block;
use crate::errors::Result;

#[derive(Clone, Debug, PartialEq)]
pub enum IntegrityIssue {
    /// Stored hash differs from the one recomputed from the block's contents.
    HashMismatch { index: u64, stored: Hash, computed: Hash },
    /// `previous_hash` does not match the preceding block's hash.
    BrokenLink { index: u64, expected: Hash, found: Hash },
    /// Indices are not consecutive.
    IndexGap { index: u64, expected: u64 },
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityIssue::HashMismatch { index, stored, computed } => {
                write!(f, "block #{index}: hash mismatch (stored {stored}, computed {computed})")
            }
            IntegrityIssue::BrokenLink { index, expected, found } => {
                write!(f, "block #{index}: broken link (expected previous {expected}, found {found})")
            }
            IntegrityIssue::IndexGap { index, expected } => {
                write!(f, "block #{index}: expected index {expected}")
            }
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct IntegrityReport {
    pub blocks_checked: usize,
    pub issues: Vec<IntegrityIssue>,
}

impl IntegrityReport {
    pub fn is_intact(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Checks the blocks in order. The first block's own link is not checked,
/// since after retention its predecessor is gone.
pub fn verify_blocks(blocks: &[Block]) -> Result<IntegrityReport> {
    let mut report = IntegrityReport {
        blocks_checked: blocks.len(),
        issues: Vec::new(),
    };

    for (position, block) in blocks.iter().enumerate() {
        let computed = block.recompute_hash()?;
        if computed != block.block_hash {
            report.issues.push(IntegrityIssue::HashMismatch {
                index: block.index,
                stored: block.block_hash.clone(),
                computed,
            });
        }

        if position == 0 {
            continue;
        }
        let previous = &blocks[position - 1];
        if block.previous_hash != previous.block_hash {
            report.issues.push(IntegrityIssue::BrokenLink {
                index: block.index,
                expected: previous.block_hash.clone(),
                found: block.previous_hash.clone(),
            });
        }
        if block.index != previous.index + 1 {
            report.issues.push(IntegrityIssue::IndexGap {
                index: block.index,
                expected: previous.index + 1,
            });
        }
    }

    if report.is_intact() {
        tracing::debug!("Verified {} block(s)", report.blocks_checked);
    } else {
        tracing::warn!("Chain verification found {} issue(s)", report.issues.len());
    }
    Ok(report)
}
