//! Fetch error type shared by both client variants.

use std::fmt;

/// Error returned while fetching one window or probing the payload length.
/// Kept as a concrete enum so callers can tell a short read from a protocol
/// failure before converting to anyhow at the CLI boundary.
#[derive(Debug)]
pub enum FetchError {
    /// Curl reported an error (timeout, connection refused, DNS, etc.).
    Curl(curl::Error),
    /// Socket-level I/O failed (raw variant).
    Io(std::io::Error),
    /// HTTP response had an unexpected status for this request.
    Http { expected: u32, got: u32 },
    /// Server closed the stream before delivering the full window body.
    /// Surfaced explicitly instead of accepting the truncated chunk.
    ShortRead { expected: u64, received: u64 },
    /// The length-discovery response carried no usable total length.
    MissingLength,
    /// The response bytes could not be framed as HTTP/1.1 (raw variant).
    Malformed(String),
    /// The URL could not be parsed or is not plain-HTTP (raw variant).
    BadUrl(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Curl(e) => write!(f, "{}", e),
            FetchError::Io(e) => write!(f, "i/o: {}", e),
            FetchError::Http { expected, got } => {
                write!(f, "HTTP {} (expected {})", got, expected)
            }
            FetchError::ShortRead { expected, received } => {
                write!(f, "short read: expected {} bytes, got {}", expected, received)
            }
            FetchError::MissingLength => write!(f, "response carried no total length"),
            FetchError::Malformed(msg) => write!(f, "malformed response: {}", msg),
            FetchError::BadUrl(msg) => write!(f, "bad url: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Curl(e) => Some(e),
            FetchError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<curl::Error> for FetchError {
    fn from(e: curl::Error) -> Self {
        FetchError::Curl(e)
    }
}

impl From<std::io::Error> for FetchError {
    fn from(e: std::io::Error) -> Self {
        FetchError::Io(e)
    }
}
