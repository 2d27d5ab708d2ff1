// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Seller node mirrors.

use std::fs;
use std::path::{Path, PathBuf};

use crate::chain::Chain;
use crate::errors::Result;
use crate::persistence::{write_bytes_atomic, write_json_atomic};
use crate::projection::{block_file, node_dir, node_latest_file};

/// Creates `Node_1_ledger` .. `Node_{sellers}_ledger`. Existing directories are left alone.
pub fn initialize_seller_nodes(base_dir: &Path, sellers: usize) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::with_capacity(sellers);
    for seller in 1..=sellers {
        let dir = node_dir(base_dir, seller);
        fs::create_dir_all(&dir)?;
        dirs.push(dir);
    }
    tracing::info!("{} seller node(s) ready under {:?}", sellers, base_dir);
    Ok(dirs)
}

#[derive(Clone, Debug, PartialEq)]
pub struct SyncSummary {
    pub head_index: u64,
    pub synced: usize,
}

/// Copies the head block file into every mirror as `latest_block_ledger.json`.
/// A head whose block file is gone is re-serialised from memory.
pub fn light_sync(base_dir: &Path, chain: &Chain, sellers: usize) -> Result<SyncSummary> {
    let head = chain.head();
    let source = block_file(base_dir, head.index);

    let bytes = match fs::read(&source) {
        Ok(bytes) => Some(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Head block file {:?} missing, syncing from memory", source);
            None
        }
        Err(e) => return Err(e.into()),
    };

    for seller in 1..=sellers {
        let target = node_latest_file(base_dir, seller);
        match &bytes {
            Some(bytes) => write_bytes_atomic(&target, bytes)?,
            None => write_json_atomic(&target, &head.to_record())?,
        }
    }

    tracing::info!("Light sync of block #{} to {} node(s)", head.index, sellers);
    Ok(SyncSummary {
        head_index: head.index,
        synced: sellers,
    })
}
