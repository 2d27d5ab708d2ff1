// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use saki_market::TransactionRecord;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use crate::block::{now_timestamp, Block, BlockPayload};
use crate::chain::Chain;
use crate::config::LedgerConfig;
use crate::errors::Result;
use crate::integrity::IntegrityReport;
use crate::nodes::{self, SyncSummary};
use crate::persistence::{read_chain, save_chain, ChainFile};
use crate::projection::{ChainProjection, DiskProjection, NullProjection};

/// How `Ledger::load` obtained its chain.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadOutcome {
    Restored { blocks: usize },
    Missing,
    Empty,
    Malformed(String),
}

impl LoadOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            LoadOutcome::Restored { .. } => "restored",
            LoadOutcome::Missing => "missing",
            LoadOutcome::Empty => "empty",
            LoadOutcome::Malformed(_) => "malformed",
        }
    }

    pub fn is_restored(&self) -> bool {
        matches!(self, LoadOutcome::Restored { .. })
    }
}

pub struct Ledger<P: ChainProjection = DiskProjection> {
    config: LedgerConfig,
    chain: Chain,
    projection: P,
}

impl Ledger<DiskProjection> {
    /// Fresh chain holding only genesis, projected under the base directory.
    pub fn create(config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        fs::create_dir_all(&config.base_dir)?;
        let projection = DiskProjection::new(config.base_dir.clone());
        Self::create_with(config, projection)
    }

    /// Restores the chain file, falling back to a fresh chain when it is
    /// missing, empty or unreadable.
    pub fn load(config: LedgerConfig) -> Result<(Self, LoadOutcome)> {
        config.validate()?;
        fs::create_dir_all(&config.base_dir)?;
        let projection = DiskProjection::new(config.base_dir.clone());
        Self::load_with(config, projection)
    }

    pub fn initialize_seller_nodes(&self, sellers: usize) -> Result<Vec<PathBuf>> {
        nodes::initialize_seller_nodes(&self.config.base_dir, sellers)
    }

    pub fn light_sync(&self, sellers: usize) -> Result<SyncSummary> {
        nodes::light_sync(&self.config.base_dir, &self.chain, sellers)
    }
}

impl Ledger<NullProjection> {
    pub fn in_memory(config: LedgerConfig) -> Result<Self> {
        config.validate()?;
        Self::create_with(config, NullProjection)
    }
}

impl<P: ChainProjection> Ledger<P> {
    pub fn create_with(config: LedgerConfig, projection: P) -> Result<Self> {
        let genesis = Block::genesis(now_timestamp())?;
        projection.project_block(&genesis)?;
        tracing::info!("Genesis block created ({})", genesis.block_hash);
        let chain = Chain::with_genesis(genesis, config.retention);
        Ok(Self {
            config,
            chain,
            projection,
        })
    }

    pub fn load_with(config: LedgerConfig, projection: P) -> Result<(Self, LoadOutcome)> {
        let path = config.chain_path();
        let outcome = match read_chain(&path)? {
            ChainFile::Blocks(records) => {
                let blocks = records
                    .into_iter()
                    .map(Block::from_record)
                    .collect::<Result<Vec<_>>>()?;
                let count = blocks.len();
                let chain = Chain::from_blocks(blocks, config.retention)?;
                tracing::info!("Blockchain loaded from {:?} ({} blocks)", path, count);
                metrics::counter!("saki_chain_load_total", 1, "outcome" => "restored");
                return Ok((
                    Self {
                        config,
                        chain,
                        projection,
                    },
                    LoadOutcome::Restored { blocks: count },
                ));
            }
            ChainFile::Missing => {
                tracing::info!("No blockchain at {:?}, creating a new one", path);
                LoadOutcome::Missing
            }
            ChainFile::Empty => {
                tracing::warn!("Blockchain file {:?} is empty, creating a new one", path);
                LoadOutcome::Empty
            }
            ChainFile::Malformed(reason) => {
                tracing::warn!("Blockchain file {:?} is corrupted ({}), creating a new one", path, reason);
                LoadOutcome::Malformed(reason)
            }
        };

        metrics::counter!("saki_chain_load_total", 1, "outcome" => outcome.label());
        let ledger = Self::create_with(config, projection)?;
        Ok((ledger, outcome))
    }

    /// Seals `record` on top of the head, projects it, then pushes it.
    pub fn append(&mut self, record: TransactionRecord) -> Result<&Block> {
        let start = Instant::now();
        let iterations = record.iterations;
        let block = self.chain.seal(BlockPayload::Market(record), now_timestamp())?;
        self.projection.project_block(&block)?;

        let index = block.index;
        let dropped = self.chain.push(block);
        if dropped > 0 {
            tracing::info!("Retention limit {} reached, dropped {} block(s)", self.chain.retention(), dropped);
        }

        metrics::counter!("saki_blocks_appended_total", 1);
        metrics::histogram!("saki_equilibrium_iterations", iterations as f64);
        metrics::histogram!("saki_block_append_duration_seconds", start.elapsed().as_secs_f64());
        tracing::info!("Block #{} appended ({} iterations)", index, iterations);
        Ok(self.chain.head())
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = self.config.chain_path();
        save_chain(&path, &self.chain)?;
        Ok(path)
    }

    pub fn verify(&self) -> Result<IntegrityReport> {
        self.chain.verify()
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn head(&self) -> &Block {
        self.chain.head()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }
}
