//! Hand-rolled HTTP/1.1 range fetch client over a TCP stream.
//!
//! Same pipeline as the curl client, but every exchange is one TCP
//! connection: write a fixed-shape GET with a Range header, frame the
//! response, close. Plain HTTP only.
//!
//! Length discovery differs from the curl variant: the first request is
//! already ranged, and the total comes from the `Content-Range` header of
//! its 206 response. The first chunk's body is kept, so it is never
//! fetched twice.

pub mod frame;

use crate::config::FetchOptions;
use crate::error::FetchError;
use crate::window::{Window, WindowPlan};
use self::frame::Response;
use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use url::Url;

/// Host, port, and request target extracted from a plain-HTTP URL.
#[derive(Debug, Clone)]
struct Target {
    host: String,
    port: u16,
    /// Path plus query string, as sent on the request line.
    path: String,
}

impl Target {
    fn parse(raw: &str) -> Result<Self, FetchError> {
        let url = Url::parse(raw).map_err(|e| FetchError::BadUrl(e.to_string()))?;
        if url.scheme() != "http" {
            return Err(FetchError::BadUrl(format!(
                "unsupported scheme {:?} (raw client speaks plain http)",
                url.scheme()
            )));
        }
        let host = url
            .host_str()
            .ok_or_else(|| FetchError::BadUrl("url has no host".to_string()))?
            .to_string();
        let port = url.port_or_known_default().unwrap_or(80);
        let mut path = match url.path() {
            "" => "/".to_string(),
            p => p.to_string(),
        };
        if let Some(query) = url.query() {
            path.push('?');
            path.push_str(query);
        }
        Ok(Self { host, port, path })
    }

    /// Host header value: the URL authority, with the port when non-default
    /// (RFC 7230 §5.4).
    fn authority(&self) -> String {
        if self.port == 80 {
            self.host.clone()
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

/// Sequential range fetcher over raw sockets, one connection per request.
#[derive(Debug, Clone)]
pub struct RawClient {
    opts: FetchOptions,
}

impl RawClient {
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
        let target = Target::parse(url)?;
        // A zero chunk size would make no forward progress.
        let chunk_size = self.opts.chunk_size.max(1);

        // First exchange doubles as length discovery: request the first
        // window and read the total off Content-Range.
        let first = self.exchange(
            &target,
            &Window {
                start: 0,
                end: chunk_size,
            },
        )?;
        if first.status == 416 && first.content_range_total() == Some(0) {
            // Empty resource: the opening range is unsatisfiable by definition.
            progress(0, 0);
            return Ok(Vec::new());
        }
        check_partial(&first)?;
        let total = first.content_range_total().ok_or(FetchError::MissingLength)?;

        let expected_first = chunk_size.min(total);
        if (first.body.len() as u64) != expected_first {
            return Err(FetchError::ShortRead {
                expected: expected_first,
                received: first.body.len() as u64,
            });
        }
        tracing::debug!(total, chunk_size, "starting raw fetch");

        let mut payload = first.body;
        payload.reserve(total.saturating_sub(payload.len() as u64) as usize);
        progress(payload.len() as u64, total);

        for window in WindowPlan::resume_at(total, chunk_size, payload.len() as u64) {
            let resp = self.exchange(&target, &window)?;
            check_partial(&resp)?;
            if (resp.body.len() as u64) != window.len() {
                return Err(FetchError::ShortRead {
                    expected: window.len(),
                    received: resp.body.len() as u64,
                });
            }
            payload.extend_from_slice(&resp.body);
            progress(payload.len() as u64, total);
        }

        debug_assert_eq!(payload.len() as u64, total);
        Ok(payload)
    }

    /// One full request/response cycle on a fresh connection.
    fn exchange(&self, target: &Target, window: &Window) -> Result<Response, FetchError> {
        let mut stream = self.connect(target)?;
        let request = format!(
            "GET {} HTTP/1.1\r\nHost: {}\r\n{}\r\nConnection: close\r\n\r\n",
            target.path,
            target.authority(),
            range_header(window)
        );
        stream.write_all(request.as_bytes())?;
        stream.flush()?;
        frame::read_response(&mut stream)
    }

    fn connect(&self, target: &Target) -> Result<TcpStream, FetchError> {
        let addr = (target.host.as_str(), target.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| FetchError::BadUrl(format!("{} did not resolve", target.host)))?;
        let stream = match self.opts.connect_timeout {
            Some(t) => TcpStream::connect_timeout(&addr, t)?,
            None => TcpStream::connect(addr)?,
        };
        stream.set_read_timeout(self.opts.request_timeout)?;
        stream.set_write_timeout(self.opts.request_timeout)?;
        Ok(stream)
    }
}

fn range_header(window: &Window) -> String {
    format!("Range: {}", window.range_header_value())
}

fn check_partial(resp: &Response) -> Result<(), FetchError> {
    if resp.status != 206 {
        return Err(FetchError::Http {
            expected: 206,
            got: resp.status,
        });
    }
    Ok(())
}
