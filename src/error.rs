//! Error types for the prismaop CLI

use std::time::Duration;
use thiserror::Error;

/// Result type alias for prismaop operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

impl From<calamine::XlsxError> for Error {
    fn from(err: calamine::XlsxError) -> Self {
        Error::Spreadsheet(err.to_string())
    }
}

/// API-related errors.
///
/// A paged fetch attempt has three distinguishable outcomes: more data,
/// exhaustion, or one of these errors. Retryable variants (5xx, 429,
/// network, undecodable body) are never conflated with end-of-stream.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    #[error("Session rejected by the API (401). Check tenant credentials.")]
    Unauthorized,

    #[error("Access denied. The account lacks permission for this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded. Retry after {0:?}")]
    RateLimited(Duration),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Undecodable API response: {0}")]
    Decode(String),

    #[error("Export job failed: {0}")]
    ExportJob(String),
}

impl ApiError {
    /// Whether the failed request may succeed on a retry.
    ///
    /// 5xx and 429 are server-side hiccups, network errors are transport
    /// hiccups, and an undecodable body is treated as transient rather
    /// than as stream exhaustion.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ApiError::RateLimited(_)
                | ApiError::Server(_)
                | ApiError::Network(_)
                | ApiError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found. Run `prismaop init` to set up.")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing `[prismacloud]` key: {0}. Run `prismaop init` to set up.")]
    MissingKey(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

impl From<ini::Error> for ConfigError {
    fn from(err: ini::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failed_message() {
        let err = ApiError::AuthFailed("no token in login response".to_string());
        assert!(err.to_string().contains("no token"));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ApiError::RateLimited(Duration::from_secs(30)).is_retryable());
        assert!(ApiError::Server("boom".to_string()).is_retryable());
        assert!(ApiError::Network("reset".to_string()).is_retryable());
        assert!(ApiError::Decode("not json".to_string()).is_retryable());
    }

    #[test]
    fn test_fatal_classification() {
        assert!(!ApiError::AuthFailed("bad creds".to_string()).is_retryable());
        assert!(!ApiError::Unauthorized.is_retryable());
        assert!(!ApiError::Forbidden.is_retryable());
        assert!(!ApiError::BadRequest("bad filter".to_string()).is_retryable());
        assert!(!ApiError::NotFound("collection x".to_string()).is_retryable());
    }

    #[test]
    fn test_config_error_missing_key() {
        let err = ConfigError::MissingKey("cspm_api_url");
        assert!(err.to_string().contains("cspm_api_url"));
        assert!(err.to_string().contains("prismaop init"));
    }

    #[test]
    fn test_error_from_api_error() {
        let err: Error = ApiError::Unauthorized.into();
        match err {
            Error::Api(ApiError::Unauthorized) => (),
            _ => panic!("Expected Error::Api(ApiError::Unauthorized)"),
        }
    }

    #[test]
    fn test_error_from_config_error() {
        let err: Error = ConfigError::NotFound.into();
        match err {
            Error::Config(ConfigError::NotFound) => (),
            _ => panic!("Expected Error::Config(ConfigError::NotFound)"),
        }
    }
}
