//! Split one input line into an Observation.

use super::Observation;
use crate::error::ReplayError;

const COLUMNS: usize = 3;

/// Parse one line. Returns `Ok(None)` for blank lines.
///
/// A trailing `\r` is dropped so CRLF files parse the same as LF files.
/// Column values are not trimmed; a row with any count other than three is malformed.
pub fn parse_line(line: usize, raw: &str) -> Result<Option<Observation>, ReplayError> {
    let raw = raw.strip_suffix('\r').unwrap_or(raw);
    if raw.trim().is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = raw.split('\t').collect();
    if fields.len() != COLUMNS {
        return Err(ReplayError::Malformed {
            line,
            columns: fields.len(),
        });
    }

    Ok(Some(Observation {
        line,
        date: fields[0].to_string(),
        temperature: fields[1].to_string(),
        humidity: fields[2].to_string(),
    }))
}
