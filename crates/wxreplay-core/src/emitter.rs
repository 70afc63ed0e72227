//! Replay emitter: load observations, then submit them one by one with a
//! fixed pause between submissions.
//!
//! The whole file is parsed and every payload encoded before the first
//! request goes out, so a malformed file never produces a partial replay.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use url::Url;

use crate::config::RequestErrorPolicy;
use crate::error::ReplayError;
use crate::payload::{Payload, ValueMode};
use crate::record::{self, LoadedRecords, Observation};
use crate::submit::{CurlSubmitter, Submit};

/// Validated runtime settings, built by [`crate::config::ReplayConfig::settings`].
#[derive(Debug, Clone)]
pub struct ReplaySettings {
    pub input_path: PathBuf,
    pub target_url: Url,
    pub delay: Duration,
    pub values: ValueMode,
    pub skip_malformed: bool,
    pub on_request_error: RequestErrorPolicy,
    pub connect_timeout: Duration,
    pub timeout: Duration,
}

/// An observation with its encoded request body.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub observation: Observation,
    pub body: Vec<u8>,
}

/// Outcome counts of one replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Submissions answered with 2xx.
    pub sent: usize,
    /// Submissions that failed and were logged (continue policy only).
    pub failed: usize,
    /// Rows dropped as malformed before sending.
    pub skipped: usize,
}

impl ReplaySummary {
    pub fn attempted(&self) -> usize {
        self.sent + self.failed
    }
}

/// Encode every loaded record. Rows whose values cannot be encoded follow the
/// same skip policy as malformed rows.
pub fn prepare(
    loaded: LoadedRecords,
    values: ValueMode,
    skip_malformed: bool,
) -> Result<(Vec<Prepared>, usize), ReplayError> {
    let mut skipped = loaded.skipped.len();
    let mut prepared = Vec::with_capacity(loaded.records.len());
    for observation in loaded.records {
        let encoded = Payload::from_observation(&observation, values).and_then(|p| p.to_json());
        match encoded {
            Ok(body) => prepared.push(Prepared { observation, body }),
            Err(e) if skip_malformed && e.is_row_error() => {
                tracing::warn!("skipping row: {}", e);
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }
    Ok((prepared, skipped))
}

/// Load and encode `path` without touching the network settings.
pub fn load_file(
    path: &Path,
    values: ValueMode,
    skip_malformed: bool,
) -> Result<(Vec<Prepared>, usize), ReplayError> {
    let loaded = record::load(path, skip_malformed)?;
    prepare(loaded, values, skip_malformed)
}

/// Load and encode the configured input file.
pub fn load_prepared(settings: &ReplaySettings) -> Result<(Vec<Prepared>, usize), ReplayError> {
    load_file(
        &settings.input_path,
        settings.values,
        settings.skip_malformed,
    )
}

/// Submit `prepared` in order through `submitter`, echoing each row to `out`.
///
/// Sleeps `delay` between submissions, not after the last one.
pub fn replay<S, W>(
    prepared: &[Prepared],
    submitter: &mut S,
    delay: Duration,
    policy: RequestErrorPolicy,
    out: &mut W,
) -> Result<ReplaySummary, ReplayError>
where
    S: Submit,
    W: Write,
{
    let mut summary = ReplaySummary::default();
    for (i, row) in prepared.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            thread::sleep(delay);
        }

        let started = Instant::now();
        match submitter.submit(&row.body) {
            Ok(status) => {
                summary.sent += 1;
                tracing::debug!(
                    line = row.observation.line,
                    status,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "submitted"
                );
            }
            Err(e) if e.is_request_error() && policy == RequestErrorPolicy::Continue => {
                summary.failed += 1;
                tracing::warn!(line = row.observation.line, "submission failed: {}", e);
            }
            Err(e) => {
                tracing::error!(line = row.observation.line, "submission failed: {}", e);
                return Err(e);
            }
        }

        writeln!(out, "{}", row.observation).map_err(ReplayError::Output)?;
    }
    Ok(summary)
}

/// Full replay of `settings.input_path` against `settings.target_url` over libcurl.
pub fn run<W: Write>(settings: &ReplaySettings, out: &mut W) -> Result<ReplaySummary, ReplayError> {
    let (prepared, skipped) = load_prepared(settings)?;
    tracing::info!(
        rows = prepared.len(),
        skipped,
        url = %settings.target_url,
        delay_ms = settings.delay.as_millis() as u64,
        "starting replay"
    );

    let mut submitter =
        CurlSubmitter::new(&settings.target_url, settings.connect_timeout, settings.timeout)?;
    let mut summary = replay(
        &prepared,
        &mut submitter,
        settings.delay,
        settings.on_request_error,
        out,
    )?;
    summary.skipped = skipped;

    tracing::info!(
        sent = summary.sent,
        failed = summary.failed,
        skipped = summary.skipped,
        "replay finished"
    );
    Ok(summary)
}

/// Print each payload that would be sent, without any network I/O or delay.
pub fn preview<W: Write>(prepared: &[Prepared], out: &mut W) -> Result<(), ReplayError> {
    for row in prepared {
        out.write_all(&row.body).map_err(ReplayError::Output)?;
        out.write_all(b"\n").map_err(ReplayError::Output)?;
    }
    Ok(())
}
