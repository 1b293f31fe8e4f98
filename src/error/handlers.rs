//! Standardized error handling patterns shared by the collectors

use crate::error::{CollectorError, Result};
use reqwest::StatusCode;

/// Standard error handler for HTTP responses
pub struct HttpErrorHandler;

impl HttpErrorHandler {
    /// Handle login endpoint failures
    pub fn handle_auth_error(status: StatusCode, error_text: &str) -> CollectorError {
        let error_msg = match status.as_u16() {
            400 => "Invalid login request parameters".to_string(),
            401 => "Invalid credentials provided".to_string(),
            403 => "Access denied - account locked or requires two-factor login".to_string(),
            404 => "Authentication endpoint not found".to_string(),
            429 => "Too many login attempts".to_string(),
            _ => format!("Authentication failed (status {}): {}", status, error_text),
        };

        CollectorError::Auth(error_msg)
    }

    /// Handle non-success statuses from the repository API
    pub fn handle_request_error(
        status: StatusCode,
        error_text: &str,
        operation: &str,
    ) -> CollectorError {
        let error_msg = match status.as_u16() {
            401 => format!("Unauthorized to perform {}: {}", operation, error_text),
            403 => format!(
                "Forbidden: insufficient permissions for {}: {}",
                operation, error_text
            ),
            404 => format!("Resource not found for {}: {}", operation, error_text),
            429 => format!("Rate limited during {}: {}", operation, error_text),
            500 => format!("Registry server error during {}: {}", operation, error_text),
            502 | 503 => format!("Registry unavailable for {}: {}", operation, error_text),
            _ => format!("{} failed (status {}): {}", operation, status, error_text),
        };

        CollectorError::Request(error_msg)
    }
}

/// Network error categorization and handling
pub struct NetworkErrorHandler;

impl NetworkErrorHandler {
    /// Categorize and format network errors with helpful context
    pub fn handle_network_error(error: &reqwest::Error, context: &str) -> CollectorError {
        if error.is_timeout() {
            CollectorError::Timeout(format!("{} timeout: {}", context, error))
        } else if error.is_connect() {
            CollectorError::Network(format!("Connection error during {}: {}", context, error))
        } else if error.is_decode() {
            CollectorError::Parse(format!("Invalid response body for {}: {}", context, error))
        } else {
            CollectorError::Network(format!("{} network error: {}", context, error))
        }
    }
}

/// Validation error utilities
pub struct ValidationErrorHandler;

impl ValidationErrorHandler {
    /// Base URLs must be absolute http(s) URLs
    pub fn validate_base_url(name: &str, url: &str) -> Result<()> {
        if url.is_empty() {
            return Err(CollectorError::Validation(format!("{} cannot be empty", name)));
        }

        let parsed = url::Url::parse(url)
            .map_err(|e| CollectorError::Validation(format!("Invalid {} '{}': {}", name, url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(CollectorError::Validation(format!(
                "{} must start with http:// or https://: {}",
                name, url
            )));
        }

        Ok(())
    }

    /// Standard credential validation
    pub fn validate_credentials(username: Option<&str>, password: Option<&str>) -> Result<()> {
        match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Ok(()),
            _ => Err(CollectorError::Environment(
                "Docker Hub username and password must be set in environment variables (DOCKER_HUB_USERNAME, DOCKER_HUB_PASSWORD)".to_string(),
            )),
        }
    }

    /// Standard numeric range validation
    pub fn validate_timeout(timeout: u64) -> Result<()> {
        if timeout == 0 {
            return Err(CollectorError::Validation(
                "Timeout must be greater than 0".to_string(),
            ));
        }

        if timeout > 86400 {
            return Err(CollectorError::Validation(
                "Timeout cannot exceed 24 hours (86400 seconds)".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_mapping() {
        let err = HttpErrorHandler::handle_auth_error(StatusCode::UNAUTHORIZED, "nope");
        assert!(matches!(err, CollectorError::Auth(ref msg) if msg.contains("Invalid credentials")));

        let err = HttpErrorHandler::handle_auth_error(StatusCode::BAD_GATEWAY, "upstream");
        assert!(matches!(err, CollectorError::Auth(ref msg) if msg.contains("upstream")));
    }

    #[test]
    fn test_request_error_mapping() {
        let err = HttpErrorHandler::handle_request_error(
            StatusCode::NOT_FOUND,
            "missing",
            "repository listing",
        );
        match err {
            CollectorError::Request(msg) => {
                assert!(msg.contains("repository listing"));
                assert!(msg.contains("missing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validate_base_url() {
        assert!(ValidationErrorHandler::validate_base_url("base URL", "https://hub.docker.com").is_ok());
        assert!(ValidationErrorHandler::validate_base_url("base URL", "").is_err());
        assert!(ValidationErrorHandler::validate_base_url("base URL", "hub.docker.com").is_err());
        assert!(ValidationErrorHandler::validate_base_url("base URL", "ftp://hub.docker.com").is_err());
    }

    #[test]
    fn test_validate_credentials() {
        assert!(ValidationErrorHandler::validate_credentials(Some("u"), Some("p")).is_ok());
        assert!(matches!(
            ValidationErrorHandler::validate_credentials(Some("u"), None),
            Err(CollectorError::Environment(_))
        ));
        assert!(ValidationErrorHandler::validate_credentials(Some(""), Some("p")).is_err());
        assert!(ValidationErrorHandler::validate_credentials(None, None).is_err());
    }

    #[test]
    fn test_validate_timeout() {
        assert!(ValidationErrorHandler::validate_timeout(30).is_ok());
        assert!(ValidationErrorHandler::validate_timeout(0).is_err());
        assert!(ValidationErrorHandler::validate_timeout(100_000).is_err());
    }
}
