//! Minimal HTTP/1.1 response framer.
//!
//! Handles exactly the response shape produced by the requests this client
//! sends: a status line, header lines terminated by an empty line, and a
//! body whose size is declared by `Content-Length`. No chunked encoding, no
//! redirects, no compression. Headers must fit in one read buffer.

use crate::error::FetchError;
use std::io::Read;

/// Read buffer for the header block; headers that do not fit are fatal.
const HEADER_BUF_SIZE: usize = 8192;

/// A framed HTTP/1.1 response: status, raw header lines, body bytes.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u32,
    pub headers: Vec<String>,
    pub body: Vec<u8>,
}

impl Response {
    /// `Content-Length` value, if present and parseable.
    pub fn content_length(&self) -> Option<u64> {
        self.header_value("content-length")?.parse().ok()
    }

    /// Total resource size from `Content-Range` (`bytes X-Y/total` or
    /// `bytes */total`), if present.
    pub fn content_range_total(&self) -> Option<u64> {
        let value = self.header_value("content-range")?;
        let (_, total) = value.rsplit_once('/')?;
        total.trim().parse().ok()
    }

    fn header_value(&self, name: &str) -> Option<&str> {
        self.headers.iter().find_map(|line| {
            let (n, v) = line.split_once(':')?;
            n.trim().eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }
}

/// Read one response from `stream`.
///
/// Fills a single bounded buffer until the `CRLF CRLF` separator appears;
/// a header block that overflows the buffer is a framing error. The bytes
/// after the separator are the body prefix; the body is then read until
/// `Content-Length` is reached. EOF before that is a short read, reported
/// as an error rather than silently accepted.
pub fn read_response<R: Read>(stream: &mut R) -> Result<Response, FetchError> {
    let mut buf = vec![0u8; HEADER_BUF_SIZE];
    let mut filled = 0;
    let split = loop {
        if let Some(pos) = find_separator(&buf[..filled]) {
            break pos;
        }
        if filled == buf.len() {
            return Err(FetchError::Malformed(format!(
                "no header terminator in first {} bytes",
                buf.len()
            )));
        }
        let n = stream.read(&mut buf[filled..])?;
        if n == 0 {
            return Err(FetchError::Malformed(
                "connection closed before end of headers".to_string(),
            ));
        }
        filled += n;
    };

    let head = std::str::from_utf8(&buf[..split])
        .map_err(|_| FetchError::Malformed("non-UTF-8 header block".to_string()))?;
    let mut lines = head.split("\r\n").map(str::to_string);
    let status_line = lines
        .next()
        .ok_or_else(|| FetchError::Malformed("empty header block".to_string()))?;
    let status = parse_status(&status_line)?;
    let headers: Vec<String> = lines.filter(|l| !l.is_empty()).collect();

    let mut response = Response {
        status,
        headers,
        body: Vec::new(),
    };
    let declared = response.content_length().ok_or_else(|| {
        FetchError::Malformed("missing or unparseable Content-Length".to_string())
    })?;

    // Body prefix captured along with the headers, then the rest off the wire.
    let mut body = buf[split + 4..filled].to_vec();
    body.truncate(declared as usize);
    let mut chunk = [0u8; 4096];
    while (body.len() as u64) < declared {
        let n = stream.read(&mut chunk)?;
        if n == 0 {
            return Err(FetchError::ShortRead {
                expected: declared,
                received: body.len() as u64,
            });
        }
        let want = (declared as usize - body.len()).min(n);
        body.extend_from_slice(&chunk[..want]);
    }

    response.body = body;
    Ok(response)
}

fn find_separator(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn parse_status(line: &str) -> Result<u32, FetchError> {
    line.split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| FetchError::Malformed(format!("bad status line: {line:?}")))
}
