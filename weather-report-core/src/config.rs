use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{location::LocationCatalog, model::LocationSettings};

pub const DEFAULT_BASE_URL: &str = "https://api.met.no";

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// met.no rejects requests without an identifying User-Agent.
pub const DEFAULT_USER_AGENT: &str = concat!("weather-report/", env!("CARGO_PKG_VERSION"));

/// HTTP options for the forecast client.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HttpConfig {
    /// Override of the forecast host, e.g. a local mirror.
    pub base_url: Option<String>,
    pub user_agent: Option<String>,
    /// Total request timeout, `DEFAULT_TIMEOUT_SECS` when unset.
    pub timeout_secs: Option<u64>,
}

impl HttpConfig {
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub http: HttpConfig,

    /// Example TOML:
    /// [[locations]]
    /// country = "Norway"
    /// city = "Oslo"
    /// lat = 59.91
    /// long = 10.75
    #[serde(default)]
    pub locations: Vec<LocationSettings>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Snapshot of the configured locations.
    pub fn catalog(&self) -> LocationCatalog {
        self.locations.clone().into()
    }
}

pub(crate) fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "weather-report", "weather-report")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}
