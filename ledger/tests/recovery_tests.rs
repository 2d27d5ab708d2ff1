// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use saki_ledger::config::LedgerConfig;
use saki_ledger::persistence::{read_chain, ChainFile};
use saki_ledger::{Ledger, LoadOutcome};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_file_creates_genesis() {
    let dir = tempdir().unwrap();
    let (ledger, outcome) = Ledger::load(LedgerConfig::new(dir.path())).unwrap();

    assert_eq!(outcome, LoadOutcome::Missing);
    assert_eq!(ledger.chain().len(), 1);
    assert!(ledger.head().is_genesis());
}

#[test]
fn test_zero_byte_file_loads_as_genesis_only() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("blockchain.json"), b"").unwrap();

    let (ledger, outcome) = Ledger::load(LedgerConfig::new(dir.path())).unwrap();
    assert_eq!(outcome, LoadOutcome::Empty);
    assert_eq!(ledger.chain().len(), 1);
    assert_eq!(ledger.head().index, 0);
}

#[test]
fn test_malformed_file_recovers() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("blockchain.json"), b"{not json").unwrap();

    let (ledger, outcome) = Ledger::load(LedgerConfig::new(dir.path())).unwrap();
    assert!(matches!(outcome, LoadOutcome::Malformed(_)));
    assert!(ledger.head().is_genesis());
}

#[test]
fn test_empty_array_is_malformed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blockchain.json");
    fs::write(&path, b"[]").unwrap();

    assert!(matches!(read_chain(&path).unwrap(), ChainFile::Malformed(_)));
}

#[test]
fn test_load_does_not_rewrite_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("blockchain.json");
    fs::write(&path, b"garbage").unwrap();

    let _ = Ledger::load(LedgerConfig::new(dir.path())).unwrap();
    assert_eq!(fs::read(&path).unwrap(), b"garbage");
}

#[test]
fn test_retention_applies_on_load() {
    let dir = tempdir().unwrap();
    let config = LedgerConfig::new(dir.path());
    let mut ledger = Ledger::in_memory(config.clone()).unwrap();
    for i in 0..4 {
        ledger
            .append(saki_market::TransactionRecord {
                final_prices: vec![12.0],
                buyer_shares: vec![10.0],
                iterations: i,
                rewards: vec![0.0],
                total_payment_with_reward: 120.0,
            })
            .unwrap();
    }
    ledger.save().unwrap();

    let (restored, outcome) = Ledger::load(config.with_retention(2)).unwrap();
    assert_eq!(outcome, LoadOutcome::Restored { blocks: 5 });
    assert_eq!(restored.chain().len(), 2);
    assert_eq!(restored.head().index, 4);
}
