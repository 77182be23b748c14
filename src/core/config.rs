use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

pub const DEFAULT_LATEST_URL: &str = "https://api.exchangerate-api.com/v4";
pub const DEFAULT_HISTORICAL_URL: &str = "https://api.frankfurter.app";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LatestProviderConfig {
    pub base_url: String,
}

impl Default for LatestProviderConfig {
    fn default() -> Self {
        LatestProviderConfig {
            base_url: DEFAULT_LATEST_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct HistoricalProviderConfig {
    pub base_url: String,
}

impl Default for HistoricalProviderConfig {
    fn default() -> Self {
        HistoricalProviderConfig {
            base_url: DEFAULT_HISTORICAL_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub latest: LatestProviderConfig,
    #[serde(default)]
    pub historical: HistoricalProviderConfig,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to defaults
    /// when no file has been set up.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxboard", "fxboard")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
providers:
  latest:
    base_url: "http://example.com/latest"
  historical:
    base_url: "http://example.com/historical"
request_timeout_secs: 3
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(
            config.providers.latest.base_url,
            "http://example.com/latest"
        );
        assert_eq!(
            config.providers.historical.base_url,
            "http://example.com/historical"
        );
        assert_eq!(config.request_timeout_secs, 3);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let yaml_str = r#"
providers:
  historical:
    base_url: "http://example.com/historical"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.providers.latest.base_url, DEFAULT_LATEST_URL);
        assert_eq!(
            config.providers.historical.base_url,
            "http://example.com/historical"
        );
        assert_eq!(config.request_timeout_secs, 10);

        let empty: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(empty.providers.historical.base_url, DEFAULT_HISTORICAL_URL);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let result = AppConfig::load_from_path("/nonexistent/fxboard/config.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
