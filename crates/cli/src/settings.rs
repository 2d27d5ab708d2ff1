use anyhow::Context;
use saki_ledger::LedgerConfig;
use std::path::{Path, PathBuf};

/// Resolves the ledger config. An explicit `--base-dir` wins for this run;
/// otherwise the config file is read, or created on first use.
pub fn resolve(config_path: &Path, base_dir: Option<PathBuf>) -> anyhow::Result<LedgerConfig> {
    let config = match base_dir {
        Some(dir) if config_path.exists() => {
            let mut config = LedgerConfig::load(config_path)
                .with_context(|| format!("reading {:?}", config_path))?;
            config.base_dir = dir;
            std::fs::create_dir_all(&config.base_dir)?;
            config
        }
        other => LedgerConfig::load_or_init(config_path, other)
            .with_context(|| format!("preparing {:?}", config_path))?,
    };
    println!("📂 Tartchain folder set to: {}", config.base_dir.display());
    Ok(config)
}
