//! Curl-based range fetch client.
//!
//! Discovers the payload length with a header probe, then walks the window
//! plan with one Range GET per window, appending each body to an in-memory
//! buffer. Strictly sequential: each transfer completes before the next
//! request is issued.

use crate::config::FetchOptions;
use crate::error::FetchError;
use crate::probe;
use crate::window::{Window, WindowPlan};

/// Sequential range fetcher over libcurl.
#[derive(Debug, Clone)]
pub struct RangeClient {
    opts: FetchOptions,
}

impl RangeClient {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }

    /// Fetch the whole payload at `url` and return the reassembled buffer.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.fetch_with_progress(url, |_, _| {})
    }

    /// Like [`fetch`](Self::fetch), invoking `progress(downloaded, total)`
    /// after each completed window.
    pub fn fetch_with_progress<F>(&self, url: &str, mut progress: F) -> Result<Vec<u8>, FetchError>
    where
        F: FnMut(u64, u64),
    {
        let head = probe::probe(url, &self.opts)?;
        let total = head.require_length()?;
        if !head.accept_ranges {
            tracing::warn!("server did not advertise Accept-Ranges: bytes");
        }
        // A zero chunk size would make no forward progress.
        let chunk_size = self.opts.chunk_size.max(1);
        tracing::debug!(total, chunk_size, "starting fetch");

        let mut payload = Vec::with_capacity(total as usize);
        for window in WindowPlan::new(total, chunk_size) {
            let chunk = self.fetch_window(url, &window)?;
            payload.extend_from_slice(&chunk);
            progress(payload.len() as u64, total);
        }

        debug_assert_eq!(payload.len() as u64, total);
        Ok(payload)
    }

    /// Fetch one window with a Range GET. The server must answer 206 and
    /// deliver exactly the window's byte count.
    fn fetch_window(&self, url: &str, window: &Window) -> Result<Vec<u8>, FetchError> {
        let mut body: Vec<u8> = Vec::with_capacity(window.len() as usize);

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        if let Some(t) = self.opts.connect_timeout {
            easy.connect_timeout(t)?;
        }
        if let Some(t) = self.opts.request_timeout {
            easy.timeout(t)?;
        }

        // curl's range option takes the inclusive form without the "bytes=" prefix.
        let range = format!("{}-{}", window.start, window.end - 1);
        easy.range(&range)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()? as u32;
        if code != 206 {
            return Err(FetchError::Http {
                expected: 206,
                got: code,
            });
        }

        let received = body.len() as u64;
        if received != window.len() {
            return Err(FetchError::ShortRead {
                expected: window.len(),
                received,
            });
        }

        Ok(body)
    }
}
