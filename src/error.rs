//! Error types and handling for the `launchcast` forecaster

use thiserror::Error;

/// Main error type for the forecaster
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Upstream weather provider errors (HTTP status, transport, retries exhausted)
    #[error("API error ({source_tag}): {message}")]
    Api { source_tag: String, message: String },

    /// Upstream payload could not be interpreted
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON encoding errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl ForecastError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new API error tagged with the upstream source
    pub fn api<T: Into<String>, S: Into<String>>(source_tag: T, message: S) -> Self {
        Self::Api {
            source_tag: source_tag.into(),
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::Config { .. } => {
                "Configuration error. Please check your config file and environment.".to_string()
            }
            ForecastError::Api { source_tag, .. } => {
                format!("Unable to reach the {source_tag} weather service. Please check your internet connection.")
            }
            ForecastError::Parse { .. } => {
                "The weather service returned data that could not be read.".to_string()
            }
            ForecastError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            ForecastError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            ForecastError::Json { .. } => "Failed to encode forecast output.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = ForecastError::config("bad timezone");
        assert!(matches!(config_err, ForecastError::Config { .. }));

        let api_err = ForecastError::api("hrrr", "connection failed");
        assert!(matches!(api_err, ForecastError::Api { .. }));
        assert_eq!(api_err.to_string(), "API error (hrrr): connection failed");

        let validation_err = ForecastError::validation("unknown site");
        assert!(matches!(validation_err, ForecastError::Validation { .. }));
    }

    #[test]
    fn test_user_messages() {
        let config_err = ForecastError::config("test");
        assert!(config_err.user_message().contains("Configuration error"));

        let api_err = ForecastError::api("ecmwf", "test");
        assert!(api_err.user_message().contains("ecmwf"));

        let validation_err = ForecastError::validation("test input");
        assert!(validation_err.user_message().contains("test input"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ForecastError = io_err.into();
        assert!(matches!(err, ForecastError::Io { .. }));
    }
}
