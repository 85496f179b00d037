//! Error types and handling for `WeatherPro`
//!
//! Every failure in the fetch pipeline maps to one variant below, and every
//! variant maps to one static user-facing sentence via [`WeatherProError::user_message`].
//! Errors are surfaced in a dismissible banner and never thrown past the UI
//! boundary; there is no fatal class.

use thiserror::Error;

/// Main error type for the `WeatherPro` application
#[derive(Error, Debug)]
pub enum WeatherProError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The provider rejected our API key (HTTP 401)
    #[error("Invalid API credentials")]
    InvalidCredential,

    /// The requested city is unknown to the provider (HTTP 404)
    #[error("City not found")]
    CityNotFound,

    /// The provider throttled us (HTTP 429)
    #[error("Rate limited by weather provider")]
    RateLimited,

    /// Provider-side outage (HTTP 5xx)
    #[error("Weather service unavailable (status {status})")]
    ServiceUnavailable { status: u16 },

    /// Response arrived but could not be decoded
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// Transport-level failure before any status code arrived
    #[error("Network failure: {message}")]
    Network { message: String },

    /// I/O operation errors (preference file, config file)
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// Anything that fits no other bucket
    #[error("Unexpected error: {message}")]
    Unknown { message: String },
}

impl WeatherProError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new malformed-response error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new unknown error
    pub fn unknown<S: Into<String>>(message: S) -> Self {
        Self::Unknown {
            message: message.into(),
        }
    }

    /// Map a non-success HTTP status to the matching variant
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::InvalidCredential,
            404 => Self::CityNotFound,
            429 => Self::RateLimited,
            500 | 502 | 503 | 504 => Self::ServiceUnavailable { status },
            _ => Self::Unknown {
                message: format!("HTTP error! status: {status}"),
            },
        }
    }

    /// Get the user-facing sentence for the error banner
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherProError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            WeatherProError::InvalidCredential => {
                "API key is invalid. Please check your OpenWeatherMap API key.".to_string()
            }
            WeatherProError::CityNotFound => {
                "City not found. Please check the spelling and try again.".to_string()
            }
            WeatherProError::RateLimited => {
                "Too many requests. Please try again later.".to_string()
            }
            WeatherProError::ServiceUnavailable { .. } => {
                "Weather service is temporarily unavailable. Please try again later.".to_string()
            }
            WeatherProError::Network { .. } => {
                "Failed to fetch weather data. Please check your connection and try again."
                    .to_string()
            }
            WeatherProError::MalformedResponse { .. }
            | WeatherProError::Io { .. }
            | WeatherProError::Unknown { .. } => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for WeatherProError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse {
                message: err.to_string(),
            }
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            WeatherProError::from_status(401),
            WeatherProError::InvalidCredential
        ));
        assert!(matches!(
            WeatherProError::from_status(404),
            WeatherProError::CityNotFound
        ));
        assert!(matches!(
            WeatherProError::from_status(429),
            WeatherProError::RateLimited
        ));
        for status in [500, 502, 503, 504] {
            assert!(matches!(
                WeatherProError::from_status(status),
                WeatherProError::ServiceUnavailable { .. }
            ));
        }
        assert!(matches!(
            WeatherProError::from_status(418),
            WeatherProError::Unknown { .. }
        ));
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            WeatherProError::CityNotFound.user_message(),
            "City not found. Please check the spelling and try again."
        );
        assert_eq!(
            WeatherProError::RateLimited.user_message(),
            "Too many requests. Please try again later."
        );
        assert_eq!(
            WeatherProError::InvalidCredential.user_message(),
            "API key is invalid. Please check your OpenWeatherMap API key."
        );
        assert_eq!(
            WeatherProError::ServiceUnavailable { status: 503 }.user_message(),
            "Weather service is temporarily unavailable. Please try again later."
        );
        assert_eq!(
            WeatherProError::network("connection reset").user_message(),
            "Failed to fetch weather data. Please check your connection and try again."
        );
        assert_eq!(
            WeatherProError::unknown("whatever").user_message(),
            "An unexpected error occurred. Please try again."
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: WeatherProError = io_err.into();
        assert!(matches!(err, WeatherProError::Io { .. }));
    }
}
