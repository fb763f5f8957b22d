//! Configuration file discovery and environment overrides.

mod support;

use std::path::PathBuf;
use std::time::Duration;

use housing_viz::config::{
    ChartConfig, ConfigError, ENV_DATA_PATH, ENV_ELEMENT_ID, ENV_FETCH_TIMEOUT,
};
use housing_viz::models::{Metric, ScaleType};
use support::with_scoped_env;

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("housing-viz.toml");
        std::fs::write(
            &path,
            r#"
            [data]
            path = "merged.json"
            fetch_timeout_secs = 3

            [chart]
            element_id = "prices"
            default_metric = "sqft"
            "#,
        )
        .expect("write config");

        let config = ChartConfig::from_file(&path).expect("config parses");
        assert_eq!(config.data.path, PathBuf::from("merged.json"));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(3));
        assert_eq!(config.chart.element_id, "prices");
        assert_eq!(config.chart_options().unwrap().metric, Metric::Sqft);
        assert_eq!(config.chart_options().unwrap().scale, ScaleType::Linear);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let err = ChartConfig::from_file(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_env_overrides() {
        let config = with_scoped_env(
            &[
                (ENV_DATA_PATH, Some("/data/ma.json")),
                (ENV_FETCH_TIMEOUT, Some("25")),
                (ENV_ELEMENT_ID, Some("chart-root")),
            ],
            || ChartConfig::default().apply_env_overrides(),
        )
        .expect("overrides apply");

        assert_eq!(config.data.path, PathBuf::from("/data/ma.json"));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(25));
        assert_eq!(config.chart.element_id, "chart-root");
    }

    #[test]
    fn test_unset_env_keeps_file_values() {
        let base = ChartConfig::from_toml_str("[data]\nfetch_timeout_secs = 7").unwrap();
        let config = with_scoped_env(
            &[
                (ENV_DATA_PATH, None),
                (ENV_FETCH_TIMEOUT, None),
                (ENV_ELEMENT_ID, None),
            ],
            || base.clone().apply_env_overrides(),
        )
        .expect("no overrides");
        assert_eq!(config, base);
    }

    #[test]
    fn test_invalid_timeout_env() {
        let err = with_scoped_env(&[(ENV_FETCH_TIMEOUT, Some("soon"))], || {
            ChartConfig::default().apply_env_overrides()
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_FETCH_TIMEOUT));
    }
}
