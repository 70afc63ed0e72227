//! Observation records and the tab-separated input file they come from.
//!
//! Input has no header and exactly three columns per row, in order:
//! date, temperature, humidity. Values are kept as the raw column text;
//! typing happens later when the payload is built.

mod parse;

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::ReplayError;

pub use parse::parse_line;

/// One row of the input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    /// 1-based line number in the source file.
    pub line: usize,
    pub date: String,
    pub temperature: String,
    pub humidity: String,
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.date, self.temperature, self.humidity)
    }
}

/// Records loaded from a file plus the rows that were dropped.
#[derive(Debug, Default)]
pub struct LoadedRecords {
    pub records: Vec<Observation>,
    pub skipped: Vec<ReplayError>,
}

/// Parse a whole file. The first malformed row is returned as an error unless
/// `skip_malformed` is set, in which case it is logged and collected in `skipped`.
pub fn load(path: &Path, skip_malformed: bool) -> Result<LoadedRecords, ReplayError> {
    let text = fs::read_to_string(path).map_err(|source| ReplayError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = parse_text(&text, skip_malformed)?;
    tracing::debug!(
        path = %path.display(),
        records = loaded.records.len(),
        skipped = loaded.skipped.len(),
        "loaded observations"
    );
    Ok(loaded)
}

/// Parse already-read input text. Blank lines are ignored.
pub fn parse_text(text: &str, skip_malformed: bool) -> Result<LoadedRecords, ReplayError> {
    let mut loaded = LoadedRecords::default();
    for (idx, raw) in text.lines().enumerate() {
        match parse_line(idx + 1, raw) {
            Ok(Some(obs)) => loaded.records.push(obs),
            Ok(None) => {}
            Err(e) if skip_malformed => {
                tracing::warn!("skipping row: {}", e);
                loaded.skipped.push(e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(loaded)
}
