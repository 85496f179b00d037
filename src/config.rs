//! Configuration management for `WeatherPro`
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::WeatherProError;

/// Root configuration structure for the `WeatherPro` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeatherProConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// UI behavior settings
    #[serde(default)]
    pub ui: UiConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    #[serde(default)]
    pub api_key: String,
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// UI behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Debounce delay for the compare-city input, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl WeatherProConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with WEATHERPRO_ prefix, e.g.
        // WEATHERPRO_WEATHER__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("WEATHERPRO")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: WeatherProConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherpro").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if !self.weather.api_key.is_empty() && self.weather.api_key.len() < 8 {
            return Err(WeatherProError::config(
                "Weather API key appears to be invalid (too short). Please check your API key.",
            )
            .into());
        }

        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(WeatherProError::config(
                "Weather API timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.ui.debounce_ms > 10_000 {
            return Err(
                WeatherProError::config("Debounce delay cannot exceed 10000 ms").into(),
            );
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(WeatherProError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherProError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        Ok(())
    }

    /// Whether an API key has been provided at all
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.weather.api_key.is_empty()
    }
}
