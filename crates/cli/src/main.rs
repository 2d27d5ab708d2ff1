use clap::Parser;
use saki_cli::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli::execute(cli)
}
