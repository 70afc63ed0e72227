//! libcurl-backed submitter. One easy handle is reused so the connection
//! stays open between rows when the server allows keep-alive.

use curl::easy::{Easy, List};
use std::time::Duration;
use url::Url;

use super::{check_status, Submit};
use crate::error::ReplayError;

/// Longest response body excerpt kept for logging.
const MAX_LOGGED_BODY: usize = 256;

pub struct CurlSubmitter {
    easy: Easy,
}

impl CurlSubmitter {
    pub fn new(
        url: &Url,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self, ReplayError> {
        let mut easy = Easy::new();
        easy.url(url.as_str())?;
        easy.post(true)?;
        easy.connect_timeout(connect_timeout)?;
        easy.timeout(timeout)?;

        let mut list = List::new();
        list.append("Content-Type: application/json")?;
        list.append("Accept: application/json")?;
        easy.http_headers(list)?;

        Ok(Self { easy })
    }
}

impl Submit for CurlSubmitter {
    fn submit(&mut self, body: &[u8]) -> Result<u32, ReplayError> {
        self.easy.post_fields_copy(body)?;

        let mut response: Vec<u8> = Vec::new();
        {
            let mut transfer = self.easy.transfer();
            transfer.write_function(|data| {
                let room = MAX_LOGGED_BODY.saturating_sub(response.len());
                response.extend_from_slice(&data[..data.len().min(room)]);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = self.easy.response_code()?;
        if !response.is_empty() {
            tracing::trace!(
                status = code,
                body = %String::from_utf8_lossy(&response),
                "response body"
            );
        }
        check_status(code)
    }
}
