use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default CDN serving brand assets by identifier.
pub const DEFAULT_CDN_BASE_URL: &str = "https://cdn.brandfetch.io";

/// Tool settings loaded from `~/.config/logofetch/config.toml`.
///
/// These change rarely. The output location lives in a separate JSON side
/// file (see [`crate::output`]) that is re-read on every cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Base URL of the asset CDN; the identifier becomes the first path segment.
    pub cdn_base_url: String,
    /// Client identifier appended to every request as the `c` query parameter.
    pub client_id: String,
    /// User-Agent sent with every request.
    pub user_agent: String,
    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds (connect + transfer).
    pub timeout_secs: u64,
    /// Catalog file name inside `<outputPath>/json/`.
    pub catalog_file_name: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            cdn_base_url: DEFAULT_CDN_BASE_URL.to_string(),
            client_id: String::new(),
            user_agent: concat!("logofetch/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout_secs: 15,
            timeout_secs: 30,
            catalog_file_name: "stores.json".to_string(),
        }
    }
}

impl ToolConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.max(1))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("logofetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ToolConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as [`load_or_init`] but at an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<ToolConfig> {
    if !path.exists() {
        let default_cfg = ToolConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: ToolConfig = toml::from_str(&data)?;
    if cfg.client_id.trim().is_empty() {
        tracing::warn!(
            "client_id is empty in {}; the CDN may reject requests",
            path.display()
        );
    }
    Ok(cfg)
}

/// Like [`load_or_init`], but a settings problem never stops the tool.
///
/// On failure the defaults are returned together with the error, so the
/// caller can tell the operator what was ignored.
pub fn load_or_default() -> (ToolConfig, Option<anyhow::Error>) {
    match config_path() {
        Ok(path) => load_or_default_at(&path),
        Err(e) => fall_back(e),
    }
}

/// Same as [`load_or_default`] but at an explicit path.
pub fn load_or_default_at(path: &Path) -> (ToolConfig, Option<anyhow::Error>) {
    match load_or_init_at(path).with_context(|| format!("settings file {}", path.display())) {
        Ok(cfg) => (cfg, None),
        Err(e) => fall_back(e),
    }
}

fn fall_back(e: anyhow::Error) -> (ToolConfig, Option<anyhow::Error>) {
    tracing::warn!("using default settings: {:#}", e);
    (ToolConfig::default(), Some(e))
}
