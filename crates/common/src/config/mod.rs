//! Configuration management for BizPub services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config/default.toml, config/{APP_ENV}.toml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Dataset source configuration
    #[serde(default)]
    pub dataset: DatasetConfig,

    /// Chart rendering configuration
    #[serde(default)]
    pub charts: ChartConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetConfig {
    /// Path to the article metadata CSV
    #[serde(default = "default_dataset_path")]
    pub path: PathBuf,

    /// Reload the CSV when its modification time changes
    #[serde(default = "default_reload_on_change")]
    pub reload_on_change: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChartConfig {
    /// Chart width in pixels
    #[serde(default = "default_chart_width")]
    pub width: u32,

    /// Chart height in pixels
    #[serde(default = "default_chart_height")]
    pub height: u32,

    /// Maximum number of histogram bins
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,

    /// Largest co-author network drawn before trimming to the best-connected authors
    #[serde(default = "default_max_network_nodes")]
    pub max_network_nodes: usize,

    /// Spring layout iterations
    #[serde(default = "default_layout_iterations")]
    pub layout_iterations: usize,

    /// Spring layout seed
    #[serde(default = "default_layout_seed")]
    pub layout_seed: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name for logs
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8501 }
fn default_dataset_path() -> PathBuf { PathBuf::from("bizpub_clean.csv") }
fn default_reload_on_change() -> bool { false }
fn default_chart_width() -> u32 { 900 }
fn default_chart_height() -> u32 { 560 }
fn default_histogram_bins() -> usize { 30 }
fn default_max_network_nodes() -> usize { 150 }
fn default_layout_iterations() -> usize { 50 }
fn default_layout_seed() -> u64 { 42 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { false }
fn default_metrics_port() -> u16 { 0 }
fn default_service_name() -> String { "bizpub-dashboard".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            reload_on_change: default_reload_on_change(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            histogram_bins: default_histogram_bins(),
            max_network_nodes: default_max_network_nodes(),
            layout_iterations: default_layout_iterations(),
            layout_seed: default_layout_seed(),
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            metrics_port: default_metrics_port(),
            service_name: default_service_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__DATASET__PATH=data/bizpub_clean.csv
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make every chart empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.charts.width == 0 || self.charts.height == 0 {
            return Err(ConfigError::Message("charts.width and charts.height must be positive".into()));
        }
        if self.charts.histogram_bins == 0 {
            return Err(ConfigError::Message("charts.histogram_bins must be positive".into()));
        }
        if self.charts.max_network_nodes == 0 {
            return Err(ConfigError::Message("charts.max_network_nodes must be positive".into()));
        }
        Ok(())
    }

    /// Socket address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            dataset: DatasetConfig::default(),
            charts: ChartConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.charts.histogram_bins, 30);
        assert_eq!(config.dataset.path, PathBuf::from("bizpub_clean.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.bind_address(), "127.0.0.1:8501");
    }

    #[test]
    fn test_from_file_fills_missing_sections() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[dataset]\npath = \"data/articles.csv\"\n\n[charts]\nhistogram_bins = 12").unwrap();

        let config = AppConfig::from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.dataset.path, PathBuf::from("data/articles.csv"));
        assert_eq!(config.charts.histogram_bins, 12);
        assert_eq!(config.charts.layout_iterations, 50);
        assert_eq!(config.server.port, 8501);
    }

    #[test]
    fn test_zero_bins_rejected() {
        let mut config = AppConfig::default();
        config.charts.histogram_bins = 0;
        assert!(config.validate().is_err());
    }
}
