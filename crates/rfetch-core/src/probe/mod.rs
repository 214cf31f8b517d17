//! Length discovery for the curl variant.
//!
//! Issues one body-less request, collects the response headers, and reads
//! `Content-Length` from them. The fetch loop needs this total before it can
//! plan its windows.

mod parse;

use crate::config::FetchOptions;
use crate::error::FetchError;
use std::str;

/// Result of the length probe.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// Total payload size in bytes, if `Content-Length` was present.
    pub content_length: Option<u64>,
    /// True if server sent `Accept-Ranges: bytes`.
    pub accept_ranges: bool,
}

impl ProbeResult {
    /// The discovered total, or an error if the server did not report one.
    pub fn require_length(&self) -> Result<u64, FetchError> {
        self.content_length.ok_or(FetchError::MissingLength)
    }
}

/// Performs a body-less request and returns parsed metadata.
pub fn probe(url: &str, opts: &FetchOptions) -> Result<ProbeResult, FetchError> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.nobody(true)?;
    easy.follow_location(true)?;
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }
    if let Some(t) = opts.request_timeout {
        easy.timeout(t)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            collect_header_line(&mut headers, data);
            true
        })?;
        transfer.perform()?;
    }

    let code = easy.response_code()? as u32;
    if !(200..300).contains(&code) {
        return Err(FetchError::Http {
            expected: 200,
            got: code,
        });
    }

    Ok(parse::parse_headers(&headers))
}

/// Accumulate one header line. When redirects are followed, libcurl delivers
/// the headers of every response in the chain; a new status line starts a new
/// response, so earlier lines are discarded to keep values like
/// `Content-Length` from leaking across responses.
fn collect_header_line(headers: &mut Vec<String>, data: &[u8]) {
    if let Ok(s) = str::from_utf8(data) {
        let line = s.trim_end();
        if line.starts_with("HTTP/") {
            headers.clear();
        }
        headers.push(line.to_string());
    }
}
