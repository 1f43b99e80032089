use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::reminder::types::{SortBy, StatusFilter};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct RemindhubConfig {
    pub server: ServerConfig,
    pub github: GitHubConfig,
    pub reminders: ReminderDefaults,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    /// `stdio` or `http`, used by `remindhub serve`.
    pub transport: String,
    pub log_level: String,
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GitHubConfig {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub api_url: String,
    pub timeout_secs: u64,
}

/// Defaults applied by the MCP tools and REST API when a request omits them.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ReminderDefaults {
    pub default_status: StatusFilter,
    pub default_sort: SortBy,
    pub list_limit: u8,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: "stdio".into(),
            log_level: "info".into(),
            host: "127.0.0.1".into(),
            port: 3001,
            cors_origin: "http://localhost:5173".into(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            owner: String::new(),
            repo: String::new(),
            api_url: "https://api.github.com".into(),
            timeout_secs: 30,
        }
    }
}

impl Default for ReminderDefaults {
    fn default() -> Self {
        Self {
            default_status: StatusFilter::Active,
            default_sort: SortBy::DueDate,
            list_limit: 100,
        }
    }
}

impl GitHubConfig {
    /// Token, owner and repo are all required before talking to GitHub.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.token.is_empty(), "GitHub token is not set (GITHUB_TOKEN)");
        anyhow::ensure!(!self.owner.is_empty(), "GitHub owner is not set (GITHUB_OWNER)");
        anyhow::ensure!(!self.repo.is_empty(), "GitHub repo is not set (GITHUB_REPO)");
        anyhow::ensure!(self.timeout_secs > 0, "github.timeout_secs must be positive");
        Ok(())
    }
}

/// Returns `~/.remindhub/`
pub fn default_remindhub_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".remindhub")
}

/// Returns the default config file path: `~/.remindhub/config.toml`
pub fn default_config_path() -> PathBuf {
    default_remindhub_dir().join("config.toml")
}

impl RemindhubConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            RemindhubConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from a key lookup (environment in production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("GITHUB_TOKEN") {
            self.github.token = val;
        }
        if let Some(val) = lookup("GITHUB_OWNER") {
            self.github.owner = val;
        }
        if let Some(val) = lookup("GITHUB_REPO") {
            self.github.repo = val;
        }
        if let Some(val) = lookup("GITHUB_API_URL") {
            self.github.api_url = val;
        }
        if let Some(val) = lookup("REMINDHUB_PORT") {
            match val.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => tracing::warn!(value = %val, "ignoring invalid REMINDHUB_PORT"),
            }
        }
        if let Some(val) = lookup("REMINDHUB_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Some(val) = lookup("REMINDHUB_CORS_ORIGIN") {
            self.server.cors_origin = val;
        }
    }

    /// `host:port` for the HTTP server.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
