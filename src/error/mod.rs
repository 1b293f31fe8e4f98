//! Error types and handlers for collector operations

pub mod handlers;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CollectorError>;

#[derive(Debug, Clone, Error)]
pub enum CollectorError {
    /// Missing or unusable process environment (credentials, .env)
    #[error("Environment error: {0}")]
    Environment(String),
    /// Credentials rejected or login endpoint failure
    #[error("Authentication error: {0}")]
    Auth(String),
    /// Non-success HTTP status from the registry API
    #[error("Request error: {0}")]
    Request(String),
    /// Transport level failures
    #[error("Network error: {0}")]
    Network(String),
    /// Unexpected payloads
    #[error("Parse error: {0}")]
    Parse(String),
    /// WebDriver session errors
    #[error("Browser error: {0}")]
    Browser(String),
    /// A single result card could not be read
    #[error("Extraction error: {0}")]
    Extraction(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Timeout: {0}")]
    Timeout(String),
}

impl From<std::io::Error> for CollectorError {
    fn from(err: std::io::Error) -> Self {
        CollectorError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CollectorError {
    fn from(err: serde_json::Error) -> Self {
        CollectorError::Parse(err.to_string())
    }
}

impl From<reqwest::Error> for CollectorError {
    fn from(err: reqwest::Error) -> Self {
        handlers::NetworkErrorHandler::handle_network_error(&err, "request")
    }
}

impl From<url::ParseError> for CollectorError {
    fn from(err: url::ParseError) -> Self {
        CollectorError::Validation(err.to_string())
    }
}

impl From<csv::Error> for CollectorError {
    fn from(err: csv::Error) -> Self {
        CollectorError::Io(format!("CSV write failed: {}", err))
    }
}

impl From<fantoccini::error::CmdError> for CollectorError {
    fn from(err: fantoccini::error::CmdError) -> Self {
        CollectorError::Browser(err.to_string())
    }
}

impl From<fantoccini::error::NewSessionError> for CollectorError {
    fn from(err: fantoccini::error::NewSessionError) -> Self {
        CollectorError::Browser(format!("Failed to start WebDriver session: {}", err))
    }
}

impl From<dotenvy::Error> for CollectorError {
    fn from(err: dotenvy::Error) -> Self {
        CollectorError::Environment(err.to_string())
    }
}
