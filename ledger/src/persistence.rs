// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::block::BlockRecord;
use crate::chain::Chain;
use crate::errors::Result;

/// What was found at the chain file path.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainFile {
    Blocks(Vec<BlockRecord>),
    Missing,
    Empty,
    Malformed(String),
}

/// Writes `value` as pretty JSON through a temp file and rename, creating
/// parent directories as needed.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)?;
    write_bytes_atomic(path, &bytes)
}

pub fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Saves the whole chain as one JSON array.
pub fn save_chain(path: &Path, chain: &Chain) -> Result<()> {
    let records: Vec<BlockRecord> = chain.blocks().iter().map(|block| block.to_record()).collect();
    write_json_atomic(path, &records)?;
    tracing::debug!("Chain saved to {:?} ({} blocks)", path, records.len());
    Ok(())
}

/// Reads the chain file. Absence and corruption are reported as outcomes;
/// only unexpected I/O failures are errors.
pub fn read_chain(path: &Path) -> Result<ChainFile> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ChainFile::Missing),
        Err(e) => return Err(e.into()),
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ChainFile::Empty);
    }

    match serde_json::from_slice::<Vec<BlockRecord>>(&bytes) {
        Ok(records) if records.is_empty() => Ok(ChainFile::Malformed("chain file holds no blocks".into())),
        Ok(records) => Ok(ChainFile::Blocks(records)),
        Err(e) => Ok(ChainFile::Malformed(e.to_string())),
    }
}
