//! Authentication module for Docker Hub access

use crate::error::handlers::{HttpErrorHandler, NetworkErrorHandler};
use crate::error::{CollectorError, Result};
use crate::hub::models::{LoginRequest, LoginResponse};
use crate::logging::Logger;
use reqwest::Client;
use url::Url;

/// Username/password login against `/v2/users/login`
#[derive(Debug, Clone)]
pub struct Auth {
    client: Client,
    login_url: Url,
}

impl Auth {
    pub fn new(client: Client, base_url: &Url) -> Result<Self> {
        let login_url = base_url.join("v2/users/login")?;
        Ok(Self { client, login_url })
    }

    /// Exchange credentials for a bearer token
    pub async fn login(&self, username: &str, password: &str, output: &Logger) -> Result<String> {
        output.verbose(&format!("Attempting authentication for user: {}", username));
        output.detail(&format!("Login endpoint: {}", self.login_url));

        let response = self
            .client
            .post(self.login_url.clone())
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| {
                let err = NetworkErrorHandler::handle_network_error(&e, "login");
                CollectorError::Auth(err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            output.error(&format!("Login failed with status {}", status));
            return Err(HttpErrorHandler::handle_auth_error(status, &error_text));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| CollectorError::Auth(format!("Failed to parse login response: {}", e)))?;

        match body.token {
            Some(token) if !token.is_empty() => {
                output.detail(&format!("Token obtained (length: {} chars)", token.len()));
                Ok(token)
            }
            _ => Err(CollectorError::Auth(
                "Login response did not contain a token".to_string(),
            )),
        }
    }
}
