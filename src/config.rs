//! Configuration management for launchcast
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::ForecastError;
use crate::paragliding::ForecastHorizon;
use anyhow::{Context, Result};
use chrono_tz::Tz;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Upstream weather API settings
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Response cache settings
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Batch job output
    #[serde(default)]
    pub output: OutputConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Base URL for the Open-Meteo API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Timezone the hourly data is requested in and days are counted in
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_weather_max_retries")]
    pub max_retries: u32,
    /// Minimum spacing between upstream calls
    #[serde(default = "default_min_request_interval")]
    pub min_request_interval_ms: u64,
    /// Days requested from the high resolution model
    #[serde(default = "default_high_res_days")]
    pub high_res_days: u32,
    /// Days requested from the low resolution model, also the forecast length
    #[serde(default = "default_low_res_days")]
    pub low_res_days: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a response is served without refetching
    #[serde(default = "default_cache_ttl")]
    pub ttl_minutes: u32,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the batch job writes its JSON
    #[serde(default = "default_output_path")]
    pub path: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.open-meteo.com/v1".to_string()
}

fn default_timezone() -> String {
    "America/Los_Angeles".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_weather_max_retries() -> u32 {
    3
}

fn default_min_request_interval() -> u64 {
    150
}

fn default_high_res_days() -> u32 {
    2
}

fn default_low_res_days() -> u32 {
    7
}

fn default_cache_ttl() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_output_path() -> String {
    "public/data/forecast.json".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_base_url(),
            timezone: default_timezone(),
            timeout_seconds: default_weather_timeout(),
            max_retries: default_weather_max_retries(),
            min_request_interval_ms: default_min_request_interval(),
            high_res_days: default_high_res_days(),
            low_res_days: default_low_res_days(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_cache_ttl(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl ForecastConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment overrides, e.g. LAUNCHCAST_WEATHER__TIMEZONE
        builder = builder.add_source(
            Environment::with_prefix("LAUNCHCAST")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let mut config: ForecastConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Apply defaults for missing values
        config.apply_defaults();

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("launchcast").join("config.toml"))
    }

    /// Apply default values to zeroed or empty configuration fields
    pub fn apply_defaults(&mut self) {
        if self.weather.base_url.is_empty() {
            self.weather.base_url = default_weather_base_url();
        }
        if self.weather.timezone.is_empty() {
            self.weather.timezone = default_timezone();
        }
        if self.weather.timeout_seconds == 0 {
            self.weather.timeout_seconds = default_weather_timeout();
        }
        if self.weather.max_retries == 0 {
            self.weather.max_retries = default_weather_max_retries();
        }
        if self.weather.min_request_interval_ms == 0 {
            self.weather.min_request_interval_ms = default_min_request_interval();
        }
        if self.weather.high_res_days == 0 {
            self.weather.high_res_days = default_high_res_days();
        }
        if self.weather.low_res_days == 0 {
            self.weather.low_res_days = default_low_res_days();
        }
        if self.cache.ttl_minutes == 0 {
            self.cache.ttl_minutes = default_cache_ttl();
        }
        if self.logging.level.is_empty() {
            self.logging.level = default_log_level();
        }
        if self.logging.format.is_empty() {
            self.logging.format = default_log_format();
        }
        if self.output.path.is_empty() {
            self.output.path = default_output_path();
        }
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                ForecastError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.weather.max_retries > 10 {
            return Err(ForecastError::config("Weather API max retries cannot exceed 10").into());
        }

        if self.weather.low_res_days > 16 {
            return Err(ForecastError::config("Forecast length cannot exceed 16 days").into());
        }

        if self.weather.high_res_days > self.weather.low_res_days {
            return Err(ForecastError::config(
                "High resolution days cannot exceed the forecast length",
            )
            .into());
        }

        if self.cache.ttl_minutes > 1440 {
            return Err(ForecastError::config("Cache TTL cannot exceed 1440 minutes (1 day)").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(ForecastError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(ForecastError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(ForecastError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        self.timezone()?;

        Ok(())
    }

    /// Parsed forecast timezone
    pub fn timezone(&self) -> crate::Result<Tz> {
        self.weather.timezone.parse::<Tz>().map_err(|_| {
            ForecastError::config(format!("Unknown timezone '{}'", self.weather.timezone))
        })
    }

    #[must_use]
    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.cache.ttl_minutes))
    }

    #[must_use]
    pub fn horizon(&self) -> ForecastHorizon {
        ForecastHorizon {
            days: self.weather.low_res_days as usize,
            high_res_days: self.weather.high_res_days as usize,
        }
    }
}
