//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::table::PAGE_SIZE_OPTIONS;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Remote employee API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds (default: 30).
    #[serde(default = "default_api_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.findofficers.com/hiring_test".to_string()
}

fn default_api_timeout_secs() -> u64 {
    30
}

/// Where the add form gets its coordinates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationSource {
    /// IP geolocation lookup over HTTP.
    #[default]
    Http,
    /// Coordinates taken verbatim from this file.
    Fixed,
    /// No location capability; the form cannot be submitted.
    Disabled,
}

/// Location provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default)]
    pub provider: LocationSource,
    #[serde(default = "default_location_url")]
    pub url: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    /// Lookup timeout in seconds (default: 10).
    #[serde(default = "default_location_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_location_url() -> String {
    "http://ip-api.com/json".to_string()
}

fn default_location_timeout_secs() -> u64 {
    10
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Seconds before a notification hides itself.
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
    /// Map centre used when no employee has a valid location.
    #[serde(default = "default_map_center")]
    pub map_center: [f64; 2],
}

fn default_page_size() -> usize {
    10
}

fn default_notification_secs() -> u64 {
    6
}

fn default_map_center() -> [f64; 2] {
    [51.505, -0.09]
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml(&content) {
                Ok(config) => ConfigLoadResult::Loaded(config),
                Err(e) => ConfigLoadResult::Invalid(e),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.api.base_url.starts_with("http") {
            return Err(ConfigError::Validation(
                "API base URL must start with http:// or https://".to_string(),
            ));
        }
        if self.api.timeout_secs < 1 {
            return Err(ConfigError::Validation("API timeout must be at least 1 second".to_string()));
        }
        if self.location.provider == LocationSource::Http && !self.location.url.starts_with("http") {
            return Err(ConfigError::Validation(
                "Location URL must start with http:// or https://".to_string(),
            ));
        }
        if self.location.timeout_secs < 1 {
            return Err(ConfigError::Validation(
                "Location timeout must be at least 1 second".to_string(),
            ));
        }
        if self.location.provider == LocationSource::Fixed
            && !crate::geo::in_range(self.location.latitude, self.location.longitude)
        {
            return Err(ConfigError::Validation(
                "Fixed location must have latitude in [-90, 90] and longitude in [-180, 180]".to_string(),
            ));
        }
        if !PAGE_SIZE_OPTIONS.contains(&self.ui.page_size) {
            return Err(ConfigError::Validation(format!(
                "Page size must be one of {PAGE_SIZE_OPTIONS:?}"
            )));
        }
        if self.ui.notification_secs < 1 {
            return Err(ConfigError::Validation(
                "Notification interval must be at least 1 second".to_string(),
            ));
        }
        if !crate::geo::in_range(self.ui.map_center[0], self.ui.map_center[1]) {
            return Err(ConfigError::Validation("Map centre is out of range".to_string()));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_api_timeout_secs(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: LocationSource::default(),
            url: default_location_url(),
            latitude: 0.0,
            longitude: 0.0,
            timeout_secs: default_location_timeout_secs(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            notification_secs: default_notification_secs(),
            map_center: default_map_center(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.api.base_url, "https://api.findofficers.com/hiring_test");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.ui.page_size, 10);
        assert_eq!(config.location.provider, LocationSource::Http);
    }

    #[test]
    fn test_parse_fixed_location() {
        let content = r#"
[location]
provider = "fixed"
latitude = 12.5
longitude = -45.25
"#;
        let config = AppConfig::from_toml(content).unwrap();
        assert_eq!(config.location.provider, LocationSource::Fixed);
        assert_eq!(config.location.latitude, 12.5);
        assert_eq!(config.location.longitude, -45.25);
    }

    #[test]
    fn test_validation_invalid_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "ftp://invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_page_size() {
        let mut config = AppConfig::default();

        config.ui.page_size = 7;
        assert!(config.validate().is_err());

        config.ui.page_size = 25;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_fixed_location_out_of_range() {
        let mut config = AppConfig::default();
        config.location.provider = LocationSource::Fixed;
        config.location.latitude = 95.0;
        assert!(config.validate().is_err());

        // Range only matters for the fixed provider
        config.location.provider = LocationSource::Disabled;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_zero_timeouts() {
        let mut config = AppConfig::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.location.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let result = AppConfig::from_toml("[api\nbase_url = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let path = std::env::temp_dir().join(format!("employee_directory_cfg_{}.toml", std::process::id()));
        let mut config = AppConfig::default();
        config.ui.page_size = 50;
        config.save(&path).unwrap();

        match AppConfig::try_load(&path) {
            ConfigLoadResult::Loaded(loaded) => assert_eq!(loaded.ui.page_size, 50),
            other => panic!("unexpected load result: {other:?}"),
        }
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("employee_directory_does_not_exist.toml");
        assert!(matches!(AppConfig::try_load(&path), ConfigLoadResult::Missing));
    }
}
