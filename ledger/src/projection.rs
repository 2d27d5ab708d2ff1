// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! File-system projection of appended blocks.
//!
//! Layout under the base directory:
//! - `Block_{index}/block_data.json`
//! - `Node_{seller}_ledger/block_{index}_ledger.json`, sellers numbered from 1

use std::path::{Path, PathBuf};

use crate::block::Block;
use crate::errors::Result;
use crate::persistence::write_json_atomic;

pub const BLOCK_DATA_FILE: &str = "block_data.json";
pub const MARKET_HISTORY_FILE: &str = "market_history.json";
pub const LATEST_LEDGER_FILE: &str = "latest_block_ledger.json";

pub fn block_dir(base_dir: &Path, index: u64) -> PathBuf {
    base_dir.join(format!("Block_{index}"))
}

pub fn block_file(base_dir: &Path, index: u64) -> PathBuf {
    block_dir(base_dir, index).join(BLOCK_DATA_FILE)
}

pub fn node_dir(base_dir: &Path, seller: usize) -> PathBuf {
    base_dir.join(format!("Node_{seller}_ledger"))
}

pub fn node_block_file(base_dir: &Path, seller: usize, index: u64) -> PathBuf {
    node_dir(base_dir, seller).join(format!("block_{index}_ledger.json"))
}

pub fn node_latest_file(base_dir: &Path, seller: usize) -> PathBuf {
    node_dir(base_dir, seller).join(LATEST_LEDGER_FILE)
}

/// Side effects of a block entering the chain.
pub trait ChainProjection {
    fn project_block(&self, block: &Block) -> Result<()>;
}

/// Writes the block file and one mirror per seller named in the payload.
#[derive(Clone, Debug)]
pub struct DiskProjection {
    base_dir: PathBuf,
}

impl DiskProjection {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }
}

impl ChainProjection for DiskProjection {
    fn project_block(&self, block: &Block) -> Result<()> {
        write_json_atomic(&block_file(&self.base_dir, block.index), &block.to_record())?;

        let sellers = block.transactions.seller_count();
        if sellers > 0 {
            let mirror = block.node_record();
            for seller in 1..=sellers {
                write_json_atomic(&node_block_file(&self.base_dir, seller, block.index), &mirror)?;
            }
        }
        tracing::debug!("Projected block #{} to {} seller mirror(s)", block.index, sellers);
        Ok(())
    }
}

/// Keeps everything in memory.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullProjection;

impl ChainProjection for NullProjection {
    fn project_block(&self, _block: &Block) -> Result<()> {
        Ok(())
    }
}
