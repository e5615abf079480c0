use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "REELFOLIO_HOME";
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.web3forms.com/submit";

fn default_relay_endpoint() -> String {
    DEFAULT_RELAY_ENDPOINT.to_string()
}

fn default_thumbnail_width() -> u32 {
    crate::resolver::DEFAULT_THUMBNAIL_WIDTH
}

/// Site config stored in ~/.reelfolio/config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_relay_endpoint")]
    pub relay_endpoint: String,
    #[serde(default)]
    pub relay_access_key: Option<String>,
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: u32,
    #[serde(default)]
    pub last_category: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            relay_endpoint: default_relay_endpoint(),
            relay_access_key: None,
            thumbnail_width: default_thumbnail_width(),
            last_category: None,
        }
    }
}

/// `$REELFOLIO_HOME` if set, otherwise `~/.reelfolio`.
pub fn reelfolio_home() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    dirs::home_dir()
        .map(|h| h.join(".reelfolio"))
        .context("cannot determine home directory")
}

pub fn database_path(home: &Path) -> PathBuf {
    home.join("portfolio.db")
}

pub fn read_config(home: &Path) -> Result<Config> {
    let path = home.join("config.json");
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
        tracing::warn!("config.json unreadable, using defaults: {}", e);
        Config::default()
    }))
}

pub fn write_config(home: &Path, config: &Config) -> Result<()> {
    std::fs::create_dir_all(home)?;
    let tmp = home.join("config.json.tmp");
    std::fs::write(&tmp, serde_json::to_string_pretty(config)?)?;
    std::fs::rename(&tmp, home.join("config.json"))?;
    Ok(())
}

/// Append one audit line to `<home>/logs/operation.log`. Best effort.
pub fn append_operation_log(home: &Path, event: &str) {
    let logs = home.join("logs");
    if let Err(e) = std::fs::create_dir_all(&logs) {
        tracing::warn!("cannot create log dir {:?}: {}", logs, e);
        return;
    }
    if let Ok(mut f) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(logs.join("operation.log"))
    {
        let now = chrono::Utc::now().to_rfc3339();
        let _ = writeln!(f, "[{}] {}", now, event);
    }
}
