//! Configuration handling for feed_sync

use serde::{Deserialize, Serialize};
use std::fs;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::sync::SyncMode;

/// Load configuration from a TOML file
pub fn load_from_file(path: &str) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| Error::ConfigError(format!("Failed to read config file {}: {}", path, e)))?;

    config_str
        .parse()
        .map_err(|e| Error::ConfigError(format!("Failed to parse config file {}: {}", path, e)))
}

/// Represents the complete feed_sync configuration
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    pub logging: Option<LoggingConfig>,
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// Database connection configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    #[serde(default = "default_db_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_schema")]
    pub schema: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            pool_size: default_pool_size(),
            timeout_seconds: default_db_timeout(),
            schema: default_schema(),
        }
    }
}

/// Where the feed document comes from
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SourceConfig {
    pub file: Option<String>,
    pub url: Option<String>,
    #[serde(default = "default_fetch_timeout")]
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            file: None,
            url: None,
            timeout_seconds: default_fetch_timeout(),
        }
    }
}

/// Synchronization behavior
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SyncConfig {
    #[serde(default)]
    pub mode: SyncMode,
    #[serde(default = "default_root_section")]
    pub root_section: String,
    /// Type child-element columns from their text instead of `varchar`
    #[serde(default)]
    pub detect_child_types: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            mode: SyncMode::default(),
            root_section: default_root_section(),
            detect_child_types: false,
        }
    }
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    pub file: Option<String>,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_true")]
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
            format: default_log_format(),
            stdout: true,
        }
    }
}

fn default_pool_size() -> u32 {
    5
}

fn default_db_timeout() -> u64 {
    30
}

fn default_fetch_timeout() -> u64 {
    60
}

fn default_schema() -> String {
    "public".to_string()
}

fn default_root_section() -> String {
    "shop".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_true() -> bool {
    true
}
