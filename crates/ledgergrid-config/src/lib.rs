//! Configuration management for ledgergrid
//!
//! This module handles loading, validation, and management of
//! ledgergrid configuration from YAML files.

pub mod error;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use error::ConfigError;

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Grid pagination settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Rows per page when a grid is first opened
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Page sizes offered by the pager
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_size_options: default_page_size_options(),
        }
    }
}

fn default_page_size() -> usize {
    10
}

fn default_page_size_options() -> Vec<usize> {
    vec![10, 50, 100]
}

/// Notification toast settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Milliseconds before a notification hides itself
    #[serde(default = "default_auto_hide_ms")]
    pub auto_hide_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            auto_hide_ms: default_auto_hide_ms(),
        }
    }
}

fn default_auto_hide_ms() -> u64 {
    6000
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Grid settings
    #[serde(default)]
    pub grid: GridConfig,
    /// Notification settings
    #[serde(default)]
    pub notifications: NotificationConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: PathBuf) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            },
            _ => ConfigError::IoError,
        })?;

        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.grid.page_size_options.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "grid.page_size_options".to_string(),
                reason: "At least one page size must be offered".to_string(),
            });
        }

        if self.grid.page_size_options.iter().any(|&size| size == 0) {
            return Err(ConfigError::InvalidValue {
                field: "grid.page_size_options".to_string(),
                reason: "Page sizes must be greater than 0".to_string(),
            });
        }

        if !self.grid.page_size_options.contains(&self.grid.page_size) {
            return Err(ConfigError::InvalidValue {
                field: "grid.page_size".to_string(),
                reason: format!(
                    "Page size must be one of {:?}",
                    self.grid.page_size_options
                ),
            });
        }

        if self.notifications.auto_hide_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "notifications.auto_hide_ms".to_string(),
                reason: "Auto-hide delay must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
