use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::rows::MIN_ROWS;

/// Form controller configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct FormConfig {
    /// Recipe generation endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds; requests wait indefinitely when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Number of rows shown when the form is created
    #[serde(default = "default_initial_rows")]
    pub initial_rows: usize,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: None,
            initial_rows: default_initial_rows(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:5000/receita".to_string()
}

fn default_initial_rows() -> usize {
    MIN_ROWS
}

impl FormConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FORM__ prefix
    /// 2. recipe-form.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FORM__ENDPOINT
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("recipe-form").required(false))
            .add_source(
                Environment::with_prefix("RECIPE_FORM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Initial row count, never below the minimum
    pub fn initial_rows(&self) -> usize {
        self.initial_rows.max(MIN_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_values() {
        let config = FormConfig::default();
        assert_eq!(config.endpoint, "http://localhost:5000/receita");
        assert_eq!(config.timeout(), None);
        assert_eq!(config.initial_rows(), 3);
    }

    #[test]
    fn test_initial_rows_clamped() {
        let config = FormConfig {
            initial_rows: 1,
            ..Default::default()
        };
        assert_eq!(config.initial_rows(), 3);
    }

    #[test]
    fn test_timeout_conversion() {
        let config = FormConfig {
            timeout_secs: Some(15),
            ..Default::default()
        };
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_deserialize_partial_table() {
        let settings = Config::builder()
            .add_source(File::from_str(
                "endpoint = \"http://example.test/receita\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: FormConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.endpoint, "http://example.test/receita");
        assert_eq!(config.initial_rows, 3);
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_load_with_env_override() {
        env::set_var("RECIPE_FORM__TIMEOUT_SECS", "7");
        let config = FormConfig::load().unwrap();
        env::remove_var("RECIPE_FORM__TIMEOUT_SECS");
        assert_eq!(config.timeout_secs, Some(7));
    }
}
