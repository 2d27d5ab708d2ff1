use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use saki_ledger::persistence::write_json_atomic;
use saki_ledger::projection::{block_dir, MARKET_HISTORY_FILE};
use saki_ledger::{telemetry, Ledger, LedgerConfig};
use saki_market::types::History;
use saki_market::{run_session, MarketInput, MarketSession, SessionOptions};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Iteration history kept beside the block for charting tools.
#[derive(Serialize)]
struct MarketHistory<'a> {
    price_history: &'a History,
    share_history: &'a History,
    iterations: u32,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub block_index: u64,
    pub sellers: usize,
    pub moderated: bool,
    pub history_path: PathBuf,
}

pub fn run(
    config: &LedgerConfig,
    input_path: &Path,
    moderate_collusion: bool,
    print_metrics: bool,
) -> anyhow::Result<RunSummary> {
    let raw = fs::read(input_path).with_context(|| format!("reading market input {:?}", input_path))?;
    let input: MarketInput =
        serde_json::from_slice(&raw).with_context(|| format!("parsing market input {:?}", input_path))?;
    let market = input.validate().context("invalid market input")?;
    let sellers = market.sellers.len();

    let (mut ledger, outcome) = Ledger::load(config.clone()).context("loading blockchain")?;
    tracing::info!("Chain load outcome: {}", outcome.label());

    ledger.initialize_seller_nodes(sellers)?;
    ledger.light_sync(sellers)?;

    let options = SessionOptions {
        moderate_collusion,
        ..SessionOptions::default()
    };
    let session = run_session(&market.sellers, market.params, &market.initial_prices, &options)
        .context("market run failed")?;
    report_collusion(&session);

    let block_index = ledger.append(session.transaction_record())?.index;
    println!("\n✅ Block added successfully!");
    ledger.save().context("saving blockchain")?;
    println!("✅ Blockchain saved successfully!");

    let history_path = block_dir(&config.base_dir, block_index).join(MARKET_HISTORY_FILE);
    write_json_atomic(
        &history_path,
        &MarketHistory {
            price_history: &session.outcome.price_history,
            share_history: &session.outcome.share_history,
            iterations: session.outcome.iterations,
        },
    )?;

    print_results(&session);
    println!("\n📊 Market history saved in {}", history_path.display());

    if print_metrics {
        println!("\n{}", telemetry::get_metrics());
    }

    Ok(RunSummary {
        block_index,
        sellers: session.sellers.len(),
        moderated: session.moderated(),
        history_path,
    })
}

fn report_collusion(session: &MarketSession) {
    let report = &session.collusion;
    if report.too_fast {
        println!("⚠ Market stabilized in only {} iterations.", session.outcome.iterations);
    }
    if report.too_stable {
        println!("⚠ Prices remained almost unchanged during the game.");
    }
    if report.too_equal {
        println!("⚠ Market shares among sellers are nearly identical.");
    }
    if let Some(price) = session.moderator_price {
        println!("🚨 Collusion confirmed! Re-ran with a moderator seller at {:.2}.", price);
    } else if report.is_collusive() {
        println!("🚨 Collusion confirmed, moderation disabled.");
    }
}

fn print_results(session: &MarketSession) {
    let record = session.transaction_record();
    let moderator = session.moderated().then(|| session.sellers.len() - 1);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Seller", "Price", "Share", "Utility", "Reward"]);

    for i in 0..record.seller_count() {
        let label = if Some(i) == moderator {
            "Moderator".to_string()
        } else {
            format!("Seller {}", i + 1)
        };
        table.add_row(vec![
            label,
            format!("{:.2}", record.final_prices[i]),
            format!("{:.2}", record.buyer_shares[i]),
            format!("{:.7}", session.weighted_utility[i]),
            format!("{:.4}", record.rewards[i]),
        ]);
    }

    println!("\n📊 Final Market Results:");
    println!("{table}");
    println!("🔹 Number of Iterations: {}", record.iterations);
    println!("🔹 Total Payment: {:.2}", session.rewards.total_payment);
    println!("🔹 Total Payment with Reward: {:.2}", record.total_payment_with_reward);
}
