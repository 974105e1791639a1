//! Configuration management for the forecast service
//!
//! Settings come from an optional TOML file layered under environment
//! variables with the `BOMFORECAST_` prefix (nested keys use `__`, e.g.
//! `BOMFORECAST_FTP__HOST`). The library itself never loads configuration;
//! the binary does and hands the pieces to [`crate::ForecastService`].

use crate::ForecastError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BomConfig {
    /// File server settings
    #[serde(default)]
    pub ftp: FtpConfig,
    /// Local storage for downloaded documents
    #[serde(default)]
    pub storage: StorageConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// File server connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtpConfig {
    #[serde(default = "default_ftp_host")]
    pub host: String,
    #[serde(default = "default_ftp_port")]
    pub port: u16,
    #[serde(default = "default_ftp_user")]
    pub user: String,
    #[serde(default = "default_ftp_password")]
    pub password: String,
    /// Remote directory holding the forecast products, with leading and trailing `/`
    #[serde(default = "default_ftp_directory")]
    pub directory: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory documents are downloaded into
    #[serde(default = "default_download_dir")]
    pub download_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_address")]
    pub address: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_ftp_host() -> String {
    "ftp.bom.gov.au".to_string()
}

fn default_ftp_port() -> u16 {
    21
}

fn default_ftp_user() -> String {
    "anonymous".to_string()
}

fn default_ftp_password() -> String {
    "guest".to_string()
}

fn default_ftp_directory() -> String {
    "/anon/gen/fwo/".to_string()
}

fn default_download_dir() -> String {
    ".".to_string()
}

fn default_server_address() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for FtpConfig {
    fn default() -> Self {
        Self {
            host: default_ftp_host(),
            port: default_ftp_port(),
            user: default_ftp_user(),
            password: default_ftp_password(),
            directory: default_ftp_directory(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            download_dir: default_download_dir(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_server_address(),
            port: default_server_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl BomConfig {
    /// Load configuration from the default file location and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("BOMFORECAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: BomConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.apply_defaults();
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bom-forecast").join("config.toml"))
    }

    /// Apply default values to empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.ftp.host.is_empty() {
            self.ftp.host = default_ftp_host();
        }
        if self.ftp.user.is_empty() {
            self.ftp.user = default_ftp_user();
        }
        if self.ftp.directory.is_empty() {
            self.ftp.directory = default_ftp_directory();
        }
        if self.storage.download_dir.is_empty() {
            self.storage.download_dir = default_download_dir();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_ftp()?;
        self.validate_string_values()?;
        Ok(())
    }

    fn validate_ftp(&self) -> Result<()> {
        if self.ftp.host.trim().is_empty() {
            return Err(ForecastError::config("FTP host cannot be empty").into());
        }

        if self.ftp.port == 0 {
            return Err(ForecastError::config("FTP port cannot be 0").into());
        }

        if !self.ftp.directory.starts_with('/') || !self.ftp.directory.ends_with('/') {
            return Err(ForecastError::config(format!(
                "FTP directory '{}' must start and end with '/'",
                self.ftp.directory
            ))
            .into());
        }

        if self.server.port == 0 {
            return Err(ForecastError::config("Server port cannot be 0").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ForecastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ForecastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        Ok(())
    }

    /// Download directory as a path
    #[must_use]
    pub fn download_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.download_dir)
    }
}
