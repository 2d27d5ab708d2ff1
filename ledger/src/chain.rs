// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! In-memory chain with a retention cap.
//!
//! The chain never touches the file system; see `projection` for that.

use crate::block::{Block, BlockPayload};
use crate::errors::{LedgerError, Result};
use crate::integrity::{verify_blocks, IntegrityReport};

#[derive(Clone, Debug)]
pub struct Chain {
    blocks: Vec<Block>,
    retention: usize,
}

impl Chain {
    pub fn with_genesis(genesis: Block, retention: usize) -> Self {
        Self {
            blocks: vec![genesis],
            retention: retention.max(1),
        }
    }

    /// Adopts blocks restored from disk, oldest first.
    pub fn from_blocks(blocks: Vec<Block>, retention: usize) -> Result<Self> {
        if blocks.is_empty() {
            return Err(LedgerError::EmptyChain);
        }
        let mut chain = Self {
            blocks,
            retention: retention.max(1),
        };
        chain.enforce_retention();
        Ok(chain)
    }

    pub fn head(&self) -> &Block {
        // Never empty: every constructor installs at least one block.
        &self.blocks[self.blocks.len() - 1]
    }

    /// Index the next appended block receives.
    pub fn next_index(&self) -> u64 {
        self.head().index + 1
    }

    /// Seals `payload` on top of the head. The block is not pushed yet.
    pub fn seal(&self, payload: BlockPayload, timestamp: f64) -> Result<Block> {
        let head = self.head();
        Block::new(self.next_index(), timestamp, payload, head.block_hash.clone())
    }

    /// Pushes a sealed block and returns how many old blocks were dropped.
    pub fn push(&mut self, block: Block) -> usize {
        self.blocks.push(block);
        self.enforce_retention()
    }

    fn enforce_retention(&mut self) -> usize {
        let excess = self.blocks.len().saturating_sub(self.retention);
        if excess > 0 {
            self.blocks.drain(..excess);
            tracing::debug!("Retention dropped {} block(s), oldest now #{}", excess, self.blocks[0].index);
        }
        excess
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    pub fn verify(&self) -> Result<IntegrityReport> {
        verify_blocks(&self.blocks)
    }
}
