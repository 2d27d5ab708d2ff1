use anyhow::Context;
use saki_ledger::nodes::SyncSummary;
use saki_ledger::{Ledger, LedgerConfig};

pub fn run(config: &LedgerConfig, sellers: usize) -> anyhow::Result<SyncSummary> {
    anyhow::ensure!(sellers > 0, "number of sellers must be positive");

    let (ledger, outcome) = Ledger::load(config.clone()).context("loading blockchain")?;
    tracing::info!("Chain load outcome: {}", outcome.label());

    ledger.initialize_seller_nodes(sellers)?;
    let summary = ledger.light_sync(sellers)?;

    println!(
        "🔄 Synced block #{} to {} seller node(s).",
        summary.head_index, summary.synced
    );
    Ok(summary)
}
