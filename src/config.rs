//! Configuration management for sepsischeck
//!
//! TOML-based configuration with defaults and validation.
//! Location: ~/.sepsischeck/config.toml

use crate::cli::Verbosity;
use crate::errors::{PredictError, Result};
use crate::types::ModelKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Public prediction service
pub const DEFAULT_BASE_URL: &str = "https://ml-api-with-fastapi.onrender.com/";

/// Complete configuration for sepsischeck
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Prediction service connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub probe_timeout_sec: u64,
    pub scoring_timeout_sec: u64,
}

/// Form defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormConfig {
    pub default_model: ModelKind,
}

/// Telemetry display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub default_verbosity: String,
    pub color_output: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            probe_timeout_sec: 10,
            scoring_timeout_sec: 30,
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
            color_output: true,
        }
    }
}

impl ApiConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_sec)
    }

    pub fn scoring_timeout(&self) -> Duration {
        Duration::from_secs(self.scoring_timeout_sec)
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(config_path) => Self::load_from_file(config_path),
            None => Self::load_default(),
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PredictError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| PredictError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location, falling back to built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".sepsischeck").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let base = self.api.base_url.trim();
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(PredictError::ConfigError(format!(
                "base_url must start with http:// or https://, got '{}'",
                self.api.base_url
            )));
        }

        if self.api.probe_timeout_sec == 0 {
            return Err(PredictError::ConfigError(
                "probe_timeout_sec must be greater than 0".to_string(),
            ));
        }

        if self.api.scoring_timeout_sec == 0 {
            return Err(PredictError::ConfigError(
                "scoring_timeout_sec must be greater than 0".to_string(),
            ));
        }

        if Verbosity::from_config(&self.telemetry.default_verbosity).is_none() {
            return Err(PredictError::ConfigError(format!(
                "Invalid verbosity level: {}",
                self.telemetry.default_verbosity
            )));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| PredictError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                PredictError::ConfigError(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| PredictError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Render as TOML for display
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| PredictError::ConfigError(format!("Failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.scoring_timeout(), Duration::from_secs(30));
        assert_eq!(config.form.default_model, ModelKind::Xgboost);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_scheme() {
        let mut config = Config::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeouts() {
        let mut config = Config::default();
        config.api.scoring_timeout_sec = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.api.probe_timeout_sec = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_verbosity() {
        let mut config = Config::default();
        config.telemetry.default_verbosity = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_accepts_every_verbosity_spelling() {
        for level in ["quiet", "normal", "verbose", "very_verbose"] {
            let mut config = Config::default();
            config.telemetry.default_verbosity = level.to_string();
            assert!(config.validate().is_ok(), "{}", level);
        }
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, PredictError::ConfigError(_)));
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.api.base_url = "http://127.0.0.1:8000/".to_string();
        config.form.default_model = ModelKind::RandomForest;
        config.save(&path).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.api.base_url, "http://127.0.0.1:8000/");
        assert_eq!(loaded.form.default_model, ModelKind::RandomForest);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[form]\ndefault_model = \"random_forest\"\n").unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.form.default_model, ModelKind::RandomForest);
        assert_eq!(loaded.api.scoring_timeout_sec, 30);
    }
}
