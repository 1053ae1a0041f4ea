//! Application configuration.
//!
//! Configuration is an explicit struct passed into the analysis entry points
//! rather than ambient state. Values come from an optional TOML file with
//! per-field defaults, then environment variable overrides.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {message}")]
    Parse { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

/// Analysis parameter bounds and defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Years of history analyzed when the request does not specify
    #[serde(default = "default_years")]
    pub default_years: u32,
    /// Minimum accepted years of history
    #[serde(default = "default_min_years")]
    pub min_years: u32,
    /// Maximum accepted years of history
    #[serde(default = "default_max_years")]
    pub max_years: u32,
    /// Days pooled on each side of the target date when the request does not specify
    #[serde(default = "default_date_window")]
    pub date_window: u32,
}

/// Result cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    /// Seconds after which a cached analysis is considered stale
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
}

fn default_years() -> u32 {
    20
}

fn default_min_years() -> u32 {
    10
}

fn default_max_years() -> u32 {
    30
}

fn default_date_window() -> u32 {
    7
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_ttl() -> u64 {
    3600
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            default_years: default_years(),
            min_years: default_min_years(),
            max_years: default_max_years(),
            date_window: default_date_window(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_secs: default_cache_ttl(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration for the running process.
    ///
    /// # Environment Variables
    /// - `WPA_CONFIG` (optional): path to a TOML config file
    /// - `WPA_DEFAULT_YEARS` / `WPA_MIN_YEARS` / `WPA_MAX_YEARS` (optional)
    /// - `WPA_DATE_WINDOW` (optional): days pooled around the target date
    /// - `WPA_CACHE_ENABLED` (optional): `true` / `false`
    /// - `WPA_CACHE_TTL_SECS` (optional)
    ///
    /// File values are applied first, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("WPA_CONFIG") {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };

        if let Some(v) = env_parse("WPA_DEFAULT_YEARS")? {
            config.analysis.default_years = v;
        }
        if let Some(v) = env_parse("WPA_MIN_YEARS")? {
            config.analysis.min_years = v;
        }
        if let Some(v) = env_parse("WPA_MAX_YEARS")? {
            config.analysis.max_years = v;
        }
        if let Some(v) = env_parse("WPA_DATE_WINDOW")? {
            config.analysis.date_window = v;
        }
        if let Some(v) = env_parse("WPA_CACHE_ENABLED")? {
            config.cache.enabled = v;
        }
        if let Some(v) = env_parse("WPA_CACHE_TTL_SECS")? {
            config.cache.ttl_secs = v;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check internal consistency of the configured bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.analysis;
        if a.min_years == 0 {
            return Err(ConfigError::Invalid("min_years must be at least 1".into()));
        }
        if a.min_years > a.max_years {
            return Err(ConfigError::Invalid(format!(
                "min_years ({}) exceeds max_years ({})",
                a.min_years, a.max_years
            )));
        }
        if a.default_years < a.min_years || a.default_years > a.max_years {
            return Err(ConfigError::Invalid(format!(
                "default_years ({}) outside [{}, {}]",
                a.default_years, a.min_years, a.max_years
            )));
        }
        Ok(())
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{} has invalid value '{}'", name, raw))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::AppConfig;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.analysis.default_years, 20);
        assert_eq!(config.analysis.min_years, 10);
        assert_eq!(config.analysis.max_years, 30);
        assert_eq!(config.analysis.date_window, 7);
        assert!(config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 3600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml = r#"
            [analysis]
            default_years = 15

            [cache]
            enabled = false
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.analysis.default_years, 15);
        assert_eq!(config.analysis.min_years, 10);
        assert!(!config.cache.enabled);
        assert_eq!(config.cache.ttl_secs, 3600);
    }

    #[test]
    fn test_parse_empty_toml() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.analysis.max_years, 30);
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let toml = r#"
            [analysis]
            min_years = 25
            max_years = 20
            default_years = 22
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_default_outside_bounds() {
        let toml = r#"
            [analysis]
            default_years = 50
        "#;
        let config: AppConfig = toml::from_str(toml).unwrap();
        assert!(config.validate().is_err());
    }
}
