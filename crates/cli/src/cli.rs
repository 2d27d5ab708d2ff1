use clap::{Parser, Subcommand};
use saki_ledger::config::CONFIG_FILE;
use std::path::PathBuf;

use crate::commands::{inspect, run, sync, verify};
use crate::gate::{FirstRunGate, LicenseGate};
use crate::settings;

#[derive(Parser)]
#[command(name = "saki")]
#[command(about = "Saki Market - electricity market equilibrium with a tamper-evident ledger", long_about = None)]
pub struct Cli {
    /// Config file remembering the Tartchain folder.
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Tartchain folder for this run (overrides the config file).
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Accept the license on first run.
    #[arg(long, global = true)]
    pub accept_license: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a market from a JSON input document and commit the result as a block.
    Run {
        /// Path to the market input JSON.
        input: PathBuf,

        /// Keep the first run even when collusion is detected.
        #[arg(long)]
        no_moderator: bool,

        /// Print Prometheus metrics after the run.
        #[arg(long)]
        print_metrics: bool,
    },
    /// Show the chain, or one block in detail.
    Inspect {
        /// Block index to show.
        #[arg(long, short)]
        block: Option<u64>,
    },
    /// Recompute every block hash and check the links.
    Verify,
    /// Create seller node folders and copy the latest block into each.
    Sync {
        /// Number of sellers.
        sellers: usize,
    },
}

/// Runs a parsed command line. Parsing happens first, so help and usage
/// errors exit before anything is printed here.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    println!("🧠 Welcome to the ⚡ Saki Market Blockchain ⚡");
    saki_ledger::telemetry::init_telemetry();

    let gate = FirstRunGate::beside(&cli.config, cli.accept_license);
    if !gate.permits()? {
        anyhow::bail!("license not accepted; rerun with --accept-license to accept it");
    }

    let config = settings::resolve(&cli.config, cli.base_dir)?;

    match cli.command {
        Commands::Run {
            input,
            no_moderator,
            print_metrics,
        } => run::run(&config, &input, !no_moderator, print_metrics).map(|_| ()),
        Commands::Inspect { block } => inspect::run(&config, block),
        Commands::Verify => verify::run(&config).map(|_| ()),
        Commands::Sync { sellers } => sync::run(&config, sellers).map(|_| ()),
    }
}
