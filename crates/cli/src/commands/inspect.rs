use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use saki_ledger::persistence::{read_chain, ChainFile};
use saki_ledger::{BlockPayload, BlockRecord, LedgerConfig};

fn short(hash: &str) -> &str {
    hash.get(..16).unwrap_or(hash)
}

fn render_time(timestamp: f64) -> String {
    let secs = timestamp.trunc() as i64;
    let nanos = (timestamp.fract() * 1e9) as u32;
    chrono::DateTime::from_timestamp(secs, nanos)
        .unwrap_or_default()
        .to_rfc3339()
}

pub fn run(config: &LedgerConfig, block: Option<u64>) -> anyhow::Result<()> {
    let path = config.chain_path();

    println!("\nSaki Chain Report");
    println!("-----------------");

    let records = match read_chain(&path)? {
        ChainFile::Blocks(records) => records,
        ChainFile::Missing => {
            println!("Chain file {}: MISSING\n", path.display());
            return Ok(());
        }
        ChainFile::Empty => {
            println!("Chain file {}: EMPTY\n", path.display());
            return Ok(());
        }
        ChainFile::Malformed(reason) => {
            println!("Chain file {}: CORRUPT ({})\n", path.display(), reason);
            return Ok(());
        }
    };

    match block {
        Some(index) => {
            let record = records
                .iter()
                .find(|r| r.index == index)
                .ok_or_else(|| anyhow::anyhow!("block #{index} is not in the chain"))?;
            print_block(record);
        }
        None => print_summary(&records),
    }
    Ok(())
}

fn print_summary(records: &[BlockRecord]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Index", "Timestamp", "Sellers", "Iterations", "Payment", "Hash"]);

    for record in records {
        let (sellers, iterations, payment) = match &record.transactions {
            BlockPayload::Market(tx) => (
                tx.seller_count().to_string(),
                tx.iterations.to_string(),
                format!("{:.2}", tx.total_payment_with_reward),
            ),
            BlockPayload::Genesis { message } => ("-".to_string(), "-".to_string(), message.clone()),
        };
        table.add_row(vec![
            record.index.to_string(),
            render_time(record.timestamp),
            sellers,
            iterations,
            payment,
            short(&record.block_hash).to_string(),
        ]);
    }

    println!("{table}");
    println!("{} block(s)\n", records.len());
}

fn print_block(record: &BlockRecord) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Index".to_string(), record.index.to_string()]);
    table.add_row(vec!["Timestamp".to_string(), render_time(record.timestamp)]);
    table.add_row(vec!["Previous Hash".to_string(), record.previous_hash.clone()]);
    table.add_row(vec!["Block Hash".to_string(), record.block_hash.clone()]);

    match &record.transactions {
        BlockPayload::Market(tx) => {
            table.add_row(vec!["Final Prices".to_string(), format!("{:.2?}", tx.final_prices)]);
            table.add_row(vec!["Buyer Shares".to_string(), format!("{:.2?}", tx.buyer_shares)]);
            table.add_row(vec!["Rewards".to_string(), format!("{:.4?}", tx.rewards)]);
            table.add_row(vec!["Iterations".to_string(), tx.iterations.to_string()]);
            table.add_row(vec![
                "Total Payment with Reward".to_string(),
                format!("{:.2}", tx.total_payment_with_reward),
            ]);
        }
        BlockPayload::Genesis { message } => {
            table.add_row(vec!["Message".to_string(), message.clone()]);
        }
    }

    println!("{table}\n");
}
