//! Checksum command: compute SHA-256 of a local file.

use anyhow::Result;
use rfetch_core::digest;
use std::path::Path;

/// Compute and print SHA-256 of the given file.
pub fn run_checksum(path: &Path) -> Result<()> {
    let hash = digest::sha256_path(path)?;
    println!("{}  {}", hash, path.display());
    Ok(())
}
