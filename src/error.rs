//! Error types for endor-sweep

use thiserror::Error;

/// Result type alias for endor-sweep operations
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
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to get token: {status}, {body}")]
    AuthFailed { status: u16, body: String },

    #[error("Authentication succeeded but the response carried no token")]
    MissingToken,

    #[error("Query failed. Status Code: {status}, Response: {body}")]
    QueryFailed { status: u16, body: String },

    #[error("Delete failed. Status Code: {status}, Response: {body}")]
    DeleteFailed { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
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
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("API key not configured. Set API_KEY in the environment or .env file.")]
    MissingApiKey,

    #[error("API secret not configured. Set API_SECRET in the environment or .env file.")]
    MissingApiSecret,

    #[error("Namespace not configured. Set ENDOR_NAMESPACE in the environment or .env file.")]
    MissingNamespace,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
