//! `rfetch fetch <url>` – fetch a payload in ranged windows and print its digest.

use anyhow::{Context, Result};
use rfetch_core::client::RangeClient;
use rfetch_core::config::FetchOptions;
use rfetch_core::digest;
use rfetch_core::raw::RawClient;

/// Fetch `url` with the selected client variant, report progress per window,
/// and print the SHA-256 of the reassembled payload.
pub fn run_fetch(url: &str, opts: FetchOptions, raw: bool) -> Result<()> {
    println!("Downloading {url}...");
    let progress = |done: u64, total: u64| {
        println!("Downloaded: {done}/{total}");
    };

    let payload = if raw {
        RawClient::new(opts)
            .fetch_with_progress(url, progress)
            .with_context(|| format!("raw fetch of {url}"))?
    } else {
        RangeClient::new(opts)
            .fetch_with_progress(url, progress)
            .with_context(|| format!("fetch of {url}"))?
    };

    println!("SHA-256: {}", digest::sha256_hex(&payload));
    Ok(())
}
