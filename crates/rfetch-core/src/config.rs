use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default fetch window size: 64 KiB.
pub const DEFAULT_CHUNK_SIZE: u64 = 64 * 1024;

/// Global configuration loaded from `~/.config/rfetch/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RfetchConfig {
    /// Size of each fetch window in bytes.
    pub chunk_size_bytes: u64,
    /// Connect timeout in seconds (0 = no timeout).
    #[serde(default)]
    pub connect_timeout_secs: u64,
    /// Per-request timeout in seconds (0 = no timeout).
    #[serde(default)]
    pub request_timeout_secs: u64,
}

impl Default for RfetchConfig {
    fn default() -> Self {
        Self {
            chunk_size_bytes: DEFAULT_CHUNK_SIZE,
            connect_timeout_secs: 15,
            request_timeout_secs: 60,
        }
    }
}

/// Options handed to a client at construction. Built from the config file
/// (with CLI overrides) rather than read from process-wide state.
#[derive(Debug, Clone, Copy)]
pub struct FetchOptions {
    /// Size of each fetch window in bytes.
    pub chunk_size: u64,
    /// Connect timeout, if any.
    pub connect_timeout: Option<Duration>,
    /// Per-request timeout, if any.
    pub request_timeout: Option<Duration>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        RfetchConfig::default().fetch_options()
    }
}

impl RfetchConfig {
    /// Convert configured values into per-client options.
    pub fn fetch_options(&self) -> FetchOptions {
        let secs = |n: u64| (n > 0).then(|| Duration::from_secs(n));
        FetchOptions {
            chunk_size: self.chunk_size_bytes,
            connect_timeout: secs(self.connect_timeout_secs),
            request_timeout: secs(self.request_timeout_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: RfetchConfig = toml::from_str(&data)?;
    Ok(cfg)
}
