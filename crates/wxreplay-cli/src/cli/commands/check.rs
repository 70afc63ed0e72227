//! `wxreplay check` – parse and encode the input file without sending.

use anyhow::{Context, Result};
use wxreplay_core::config::ReplayConfig;
use wxreplay_core::emitter;

/// Only input-related settings are consulted; target URL and timing are ignored.
pub fn run_check(cfg: &ReplayConfig) -> Result<()> {
    let (prepared, skipped) = emitter::load_file(&cfg.input_path, cfg.values, cfg.skip_malformed)
        .with_context(|| format!("check {}", cfg.input_path.display()))?;
    println!(
        "{}: {} record(s) ok, {} skipped",
        cfg.input_path.display(),
        prepared.len(),
        skipped
    );
    Ok(())
}
