// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{LedgerError, Result};

/// Config file remembered between runs.
pub const CONFIG_FILE: &str = "saki_config.json";

/// Most recent blocks kept in the chain.
pub const DEFAULT_RETENTION: usize = 1000;

pub const DEFAULT_CHAIN_FILE: &str = "blockchain.json";

pub const DEFAULT_BASE_DIR: &str = "tartchain";

fn default_retention() -> usize {
    DEFAULT_RETENTION
}

fn default_chain_file() -> String {
    DEFAULT_CHAIN_FILE.to_string()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Directory holding the chain file, block folders and node mirrors.
    pub base_dir: PathBuf,
    #[serde(default = "default_retention")]
    pub retention: usize,
    #[serde(default = "default_chain_file")]
    pub chain_file: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            retention: DEFAULT_RETENTION,
            chain_file: DEFAULT_CHAIN_FILE.to_string(),
        }
    }
}

impl LedgerConfig {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_retention(mut self, retention: usize) -> Self {
        self.retention = retention;
        self
    }

    pub fn chain_path(&self) -> PathBuf {
        self.base_dir.join(&self.chain_file)
    }

    pub fn validate(&self) -> Result<()> {
        if self.retention == 0 {
            return Err(LedgerError::Config("retention must keep at least one block".into()));
        }
        if self.chain_file.is_empty() {
            return Err(LedgerError::Config("chain_file must not be empty".into()));
        }
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = fs::read(path.as_ref())?;
        let config: Self = serde_json::from_slice(&bytes)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), serde_json::to_vec_pretty(self)?)?;
        Ok(())
    }

    /// Reads the config at `path`, or creates it from `base_dir` (falling
    /// back to the default directory) on first use. The base directory is
    /// created either way.
    pub fn load_or_init(path: impl AsRef<Path>, base_dir: Option<PathBuf>) -> Result<Self> {
        let path = path.as_ref();
        let config = if path.exists() {
            tracing::debug!("Reading ledger config from {:?}", path);
            Self::load(path)?
        } else {
            let config = base_dir.map(Self::new).unwrap_or_default();
            config.validate()?;
            config.save(path)?;
            tracing::info!("Ledger config written to {:?}", path);
            config
        };

        fs::create_dir_all(&config.base_dir)?;
        Ok(config)
    }
}
