//! Chart configuration file support.
//!
//! Settings are read from a `housing-viz.toml` file and then overridden by
//! environment variables:
//!
//! - `HOUSING_VIZ_DATA_PATH`: dataset file path
//! - `HOUSING_VIZ_FETCH_TIMEOUT_SECS`: fetch timeout in seconds
//! - `HOUSING_VIZ_ELEMENT_ID`: id of the chart's root element

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::{ChartOptions, Metric, ScaleType};
use crate::render::Layout;

pub const CONFIG_FILE_NAME: &str = "housing-viz.toml";
pub const ENV_DATA_PATH: &str = "HOUSING_VIZ_DATA_PATH";
pub const ENV_FETCH_TIMEOUT: &str = "HOUSING_VIZ_FETCH_TIMEOUT_SECS";
pub const ENV_ELEMENT_ID: &str = "HOUSING_VIZ_ELEMENT_ID";

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("No {} found in standard locations", CONFIG_FILE_NAME)]
    NotFound,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub chart: ChartSettings,
}

/// Where the dataset lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

/// Chart presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    #[serde(default = "default_element_id")]
    pub element_id: String,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_metric")]
    pub default_metric: String,
    #[serde(default)]
    pub log_scale: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            element_id: default_element_id(),
            width: default_width(),
            height: default_height(),
            default_metric: default_metric(),
            log_scale: false,
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/ma_housing_merged.json")
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_element_id() -> String {
    "box-plot".to_string()
}

fn default_width() -> f64 {
    800.0
}

fn default_height() -> f64 {
    500.0
}

fn default_metric() -> String {
    "price".to_string()
}

impl ChartConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `housing-viz.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    /// Default-location file if one exists, built-in defaults otherwise.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        match Self::from_default_location() {
            Err(ConfigError::NotFound) => Ok(Self::default()),
            other => other,
        }
    }

    /// Apply `HOUSING_VIZ_*` environment overrides.
    pub fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(path) = env::var(ENV_DATA_PATH) {
            self.data.path = PathBuf::from(path);
        }
        if let Ok(secs) = env::var(ENV_FETCH_TIMEOUT) {
            self.data.fetch_timeout_secs =
                secs.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        key: ENV_FETCH_TIMEOUT.to_string(),
                        message: format!("'{}' is not a whole number of seconds", secs),
                    })?;
        }
        if let Ok(id) = env::var(ENV_ELEMENT_ID) {
            self.chart.element_id = id;
        }
        Ok(self)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.data.fetch_timeout_secs)
    }

    /// Initial chart controls.
    pub fn chart_options(&self) -> Result<ChartOptions, ConfigError> {
        let metric: Metric =
            self.chart
                .default_metric
                .parse()
                .map_err(|message| ConfigError::InvalidValue {
                    key: "chart.default_metric".to_string(),
                    message,
                })?;
        Ok(ChartOptions::new(
            metric,
            ScaleType::from_log_flag(self.chart.log_scale),
        ))
    }

    pub fn layout(&self) -> Layout {
        Layout::with_size(self.chart.width, self.chart.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config = ChartConfig::from_toml_str("").unwrap();
        assert_eq!(config, ChartConfig::default());
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.chart.element_id, "box-plot");
        assert_eq!(config.chart_options().unwrap(), ChartOptions::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = ChartConfig::from_toml_str(
            r#"
            [data]
            path = "/srv/housing.json"

            [chart]
            default_metric = "pricePerSqft"
            log_scale = true
            width = 1024
            "#,
        )
        .unwrap();

        assert_eq!(config.data.path, PathBuf::from("/srv/housing.json"));
        assert_eq!(config.data.fetch_timeout_secs, 10);
        assert_eq!(config.layout().width, 1024.0);
        assert_eq!(config.layout().height, 500.0);
        assert_eq!(
            config.chart_options().unwrap(),
            ChartOptions::new(Metric::PricePerSqft, ScaleType::Log)
        );
    }

    #[test]
    fn test_invalid_metric() {
        let config = ChartConfig::from_toml_str("[chart]\ndefault_metric = \"lot_size\"").unwrap();
        let err = config.chart_options().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("chart.default_metric"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = ChartConfig::from_toml_str("[data\npath = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
