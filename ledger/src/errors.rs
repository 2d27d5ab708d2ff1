// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Non-finite value in {field}")]
    NonFinite { field: &'static str },

    #[error("Chain has no blocks")]
    EmptyChain,
}

pub type Result<T> = std::result::Result<T, LedgerError>;
