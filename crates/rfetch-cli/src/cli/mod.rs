//! CLI for the rfetch range downloader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rfetch_core::config;
use std::path::PathBuf;

use commands::{run_checksum, run_fetch};

/// Top-level CLI for rfetch.
#[derive(Debug, Parser)]
#[command(name = "rfetch")]
#[command(about = "rfetch: ranged HTTP payload fetcher with SHA-256 reporting", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch a payload with sequential Range requests and print its SHA-256.
    Fetch {
        /// HTTP(S) URL of the payload.
        url: String,

        /// Window size in bytes for each Range request (default from config).
        #[arg(long, value_name = "BYTES")]
        chunk_size: Option<u64>,

        /// Use the raw-socket HTTP/1.1 client instead of libcurl (plain HTTP only).
        #[arg(long)]
        raw: bool,
    },

    /// Compute SHA-256 of a local file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                url,
                chunk_size,
                raw,
            } => {
                let mut opts = cfg.fetch_options();
                if let Some(size) = chunk_size {
                    opts.chunk_size = size;
                }
                run_fetch(&url, opts, raw)?;
            }
            CliCommand::Checksum { path } => run_checksum(&path)?,
        }
        Ok(())
    }
}
