//! `wxreplay replay` – send every row of the input file to the target endpoint.

use anyhow::{Context, Result};
use std::io::{self, Write};
use wxreplay_core::config::ReplayConfig;
use wxreplay_core::emitter;

pub fn run_replay(cfg: &ReplayConfig, dry_run: bool) -> Result<()> {
    let settings = cfg.settings()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if dry_run {
        let (prepared, skipped) = emitter::load_prepared(&settings)
            .with_context(|| format!("load {}", settings.input_path.display()))?;
        emitter::preview(&prepared, &mut out)?;
        tracing::info!(rows = prepared.len(), skipped, "dry run, nothing sent");
        return Ok(());
    }

    let summary = emitter::run(&settings, &mut out).with_context(|| {
        format!(
            "replay {} to {}",
            settings.input_path.display(),
            settings.target_url
        )
    })?;

    writeln!(
        out,
        "sent {} of {} row(s) to {} ({} failed, {} skipped)",
        summary.sent,
        summary.attempted(),
        settings.target_url,
        summary.failed,
        summary.skipped
    )?;
    out.flush()?;
    if summary.failed > 0 {
        anyhow::bail!(
            "{} of {} submission(s) failed",
            summary.failed,
            summary.attempted()
        );
    }
    Ok(())
}
