//! Error types for reading, encoding, and submitting observations.

use std::path::PathBuf;

/// Everything that can go wrong during a replay.
///
/// Read, parse, and URL errors are fatal. Request and status errors are
/// subject to [`crate::config::RequestErrorPolicy`].
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Input file missing or unreadable.
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Row does not have exactly three tab-separated columns.
    #[error("line {line}: expected 3 tab-separated columns, found {columns}")]
    Malformed { line: usize, columns: usize },
    /// Numeric value mode and a column does not parse as a number.
    #[error("line {line}: {field} value {value:?} is not a number")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        value: String,
    },
    /// Payload could not be serialized to JSON.
    #[error("encode payload: {0}")]
    Encode(#[from] serde_json::Error),
    /// Target URL cannot be parsed or is not http/https.
    #[error("invalid target URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Curl reported a transport error (connect, DNS, timeout).
    #[error("request failed: {0}")]
    Request(#[from] curl::Error),
    /// Server answered with a non-2xx status.
    #[error("server returned HTTP {code}")]
    Status { code: u32 },
    /// Writing the row echo to the console failed.
    #[error("write output: {0}")]
    Output(#[source] std::io::Error),
}

impl ReplayError {
    /// True for errors raised by a single submission (as opposed to input errors).
    pub fn is_request_error(&self) -> bool {
        matches!(self, ReplayError::Request(_) | ReplayError::Status { .. })
    }

    /// True for per-row input errors that `skip_malformed` may drop.
    pub fn is_row_error(&self) -> bool {
        matches!(
            self,
            ReplayError::Malformed { .. } | ReplayError::InvalidNumber { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_malformed_names_line_and_columns() {
        let e = ReplayError::Malformed {
            line: 7,
            columns: 2,
        };
        assert_eq!(
            e.to_string(),
            "line 7: expected 3 tab-separated columns, found 2"
        );
        assert!(e.is_row_error());
        assert!(!e.is_request_error());
    }

    #[test]
    fn status_is_request_error() {
        let e = ReplayError::Status { code: 503 };
        assert_eq!(e.to_string(), "server returned HTTP 503");
        assert!(e.is_request_error());
    }
}
