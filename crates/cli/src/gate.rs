use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

pub const FIRST_RUN_MARKER: &str = "first_run.json";

/// Decides whether the program may touch the ledger at all.
pub trait LicenseGate {
    fn permits(&self) -> anyhow::Result<bool>;
}

/// Passes once the license was accepted on some earlier run, recorded by
/// a marker file. Passing `--accept-license` accepts it and writes the marker.
pub struct FirstRunGate {
    marker: PathBuf,
    accept: bool,
}

impl FirstRunGate {
    pub fn new(marker: impl Into<PathBuf>, accept: bool) -> Self {
        Self {
            marker: marker.into(),
            accept,
        }
    }

    /// Gate whose marker lives next to `config_path`.
    pub fn beside(config_path: &Path, accept: bool) -> Self {
        Self::new(config_path.with_file_name(FIRST_RUN_MARKER), accept)
    }
}

impl LicenseGate for FirstRunGate {
    fn permits(&self) -> anyhow::Result<bool> {
        if self.marker.exists() {
            return Ok(true);
        }
        if !self.accept {
            return Ok(false);
        }
        let body = serde_json::json!({ "first_run_completed": true });
        fs::write(&self.marker, serde_json::to_vec(&body)?)
            .with_context(|| format!("writing {:?}", self.marker))?;
        println!("🔑 License accepted.");
        Ok(true)
    }
}
