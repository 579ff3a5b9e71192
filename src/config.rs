use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use validator::Validate;

use crate::models::domain::{UploadLimits, DEFAULT_ALLOWED_TYPES, DEFAULT_MAX_FILE_SIZE_BYTES};
use crate::services::DelayRange;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}

/// Application configuration
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct Settings {
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerSettings,
    #[serde(default)]
    #[validate(nested)]
    pub upload: UploadSettings,
    #[serde(default)]
    #[validate(nested)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    #[validate(length(min = 1))]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5000 }

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadSettings {
    #[serde(default = "default_max_file_size")]
    #[validate(range(min = 1))]
    pub max_file_size_bytes: usize,
    #[serde(default = "default_allowed_types")]
    #[validate(length(min = 1))]
    pub allowed_types: Vec<String>,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_file_size_bytes: default_max_file_size(),
            allowed_types: default_allowed_types(),
        }
    }
}

impl UploadSettings {
    pub fn limits(&self) -> UploadLimits {
        UploadLimits {
            max_file_size_bytes: self.max_file_size_bytes,
            allowed_types: self.allowed_types.clone(),
        }
    }
}

fn default_max_file_size() -> usize { DEFAULT_MAX_FILE_SIZE_BYTES }
fn default_allowed_types() -> Vec<String> {
    DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect()
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_delay_range"))]
pub struct AnalysisSettings {
    #[serde(default = "default_min_delay_ms")]
    pub min_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            min_delay_ms: default_min_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl AnalysisSettings {
    pub fn delay(&self) -> DelayRange {
        DelayRange::from_millis(self.min_delay_ms, self.max_delay_ms)
    }
}

fn default_min_delay_ms() -> u64 { 2000 }
fn default_max_delay_ms() -> u64 { 3000 }

fn validate_delay_range(analysis: &AnalysisSettings) -> Result<(), validator::ValidationError> {
    if analysis.min_delay_ms > analysis.max_delay_ms {
        return Err(validator::ValidationError::new("min_delay_exceeds_max_delay"));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with EMOTION_LENS__)
    pub fn load() -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., EMOTION_LENS__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        Self::finish(settings)
    }

    fn finish(config: Config) -> Result<Self, SettingsError> {
        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("EMOTION_LENS")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_source() {
        let config = Config::builder().build().unwrap();
        let settings = Settings::finish(config).unwrap();

        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.upload.max_file_size_bytes, 10 * 1024 * 1024);
        assert_eq!(settings.upload.limits(), UploadLimits::default());
        assert_eq!(settings.analysis.delay(), DelayRange::default());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_inverted_delay_range_is_rejected() {
        let config = Config::builder()
            .set_override("analysis.min_delay_ms", 3000)
            .unwrap()
            .set_override("analysis.max_delay_ms", 1000)
            .unwrap()
            .build()
            .unwrap();

        assert!(matches!(Settings::finish(config), Err(SettingsError::Invalid(_))));
    }

    #[test]
    fn test_empty_allowed_types_is_rejected() {
        let settings = Settings {
            server: ServerSettings::default(),
            upload: UploadSettings {
                max_file_size_bytes: 1024,
                allowed_types: vec![],
            },
            analysis: AnalysisSettings::default(),
            logging: LoggingSettings::default(),
        };

        assert!(settings.validate().is_err());
    }
}
