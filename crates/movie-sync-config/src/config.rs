use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable that overrides `[backend] base_url`
pub const API_URL_ENV: &str = "REELBOOK_API_URL";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Timings of the transient UI feedback
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    /// How long an alert stays visible before it is dismissed
    #[serde(default = "default_alert_dismiss_ms")]
    pub alert_dismiss_ms: u64,
    /// Delay between a successful update-by-id and the return to the home list
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("backend base_url must start with http:// or https://, got '{0}'")]
    InvalidBaseUrl(String),
    #[error("backend timeout_secs must be greater than zero")]
    ZeroTimeout,
    #[error("ui.{0} must be greater than zero")]
    ZeroDelay(&'static str),
}

fn default_base_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_alert_dismiss_ms() -> u64 {
    3000
}

fn default_redirect_delay_ms() -> u64 {
    3000
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            alert_dismiss_ms: default_alert_dismiss_ms(),
            redirect_delay_ms: default_redirect_delay_ms(),
        }
    }
}

impl BackendConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl UiConfig {
    pub fn alert_dismiss(&self) -> Duration {
        Duration::from_millis(self.alert_dismiss_ms)
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.redirect_delay_ms)
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `REELBOOK_API_URL` if it is set
    pub fn apply_env_overrides(&mut self) {
        self.apply_api_url_override(std::env::var(API_URL_ENV).ok());
    }

    pub fn apply_api_url_override(&mut self, url: Option<String>) {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.backend.base_url = url.trim().to_string();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend.base_url.as_str();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(url.to_string()));
        }
        if self.backend.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.ui.alert_dismiss_ms == 0 {
            return Err(ConfigError::ZeroDelay("alert_dismiss_ms"));
        }
        if self.ui.redirect_delay_ms == 0 {
            return Err(ConfigError::ZeroDelay("redirect_delay_ms"));
        }
        Ok(())
    }
}
