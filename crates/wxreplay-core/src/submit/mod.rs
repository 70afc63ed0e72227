//! Submission of JSON payloads to the target endpoint.
//!
//! [`Submit`] is the seam between the emitter and the network; the real
//! implementation is [`CurlSubmitter`], tests substitute a recording fake.

mod http;

pub use http::CurlSubmitter;

use url::Url;

use crate::error::ReplayError;

/// Sends one request body and reports the HTTP status.
pub trait Submit {
    /// POST `body` to the target. Returns the status code on 2xx,
    /// [`ReplayError::Status`] on any other status, and
    /// [`ReplayError::Request`] when no response was received.
    fn submit(&mut self, body: &[u8]) -> Result<u32, ReplayError>;
}

/// Parse the target URL and require an http or https scheme.
pub fn validate_target_url(raw: &str) -> Result<Url, ReplayError> {
    let url = Url::parse(raw).map_err(|e| ReplayError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ReplayError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {:?}", other),
        }),
    }
}

/// Map a status code to success or [`ReplayError::Status`].
pub(crate) fn check_status(code: u32) -> Result<u32, ReplayError> {
    if (200..300).contains(&code) {
        Ok(code)
    } else {
        Err(ReplayError::Status { code })
    }
}
