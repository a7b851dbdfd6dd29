pub mod config;
pub mod paths;

pub use config::{BackendConfig, Config, ConfigError, UiConfig, API_URL_ENV};
pub use paths::{PathManager, container_base_path};
