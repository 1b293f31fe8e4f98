//! Configuration management module

use crate::error::handlers::ValidationErrorHandler;
use crate::error::{CollectorError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_HUB_URL: &str = "https://hub.docker.com";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";
pub const DEFAULT_NAMESPACES: [&str; 4] = ["library", "nginx", "mysql", "alpine"];
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Docker Hub rejects larger page sizes
pub const MAX_PAGE_SIZE: u32 = 100;

pub const USERNAME_ENV: &str = "DOCKER_HUB_USERNAME";
pub const PASSWORD_ENV: &str = "DOCKER_HUB_PASSWORD";

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl AuthConfig {
    pub fn new(username: String, password: String) -> Self {
        Self { username, password }
    }

    /// Read credentials from the process environment, loading `.env` first if present
    pub fn from_env() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(e.into()),
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let username = lookup(USERNAME_ENV);
        let password = lookup(PASSWORD_ENV);
        ValidationErrorHandler::validate_credentials(username.as_deref(), password.as_deref())?;

        match (username, password) {
            (Some(username), Some(password)) => Ok(Self::new(username, password)),
            _ => Err(CollectorError::Environment(
                "Docker Hub credentials are incomplete".to_string(),
            )),
        }
    }
}

/// Docker Hub endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HubConfig {
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    pub user_agent: String,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HUB_URL.to_string(),
            timeout: 300,
            user_agent: format!("docker-hub-collector/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HubConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL without a trailing slash
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn validate(&self) -> Result<()> {
        ValidationErrorHandler::validate_base_url("Docker Hub base URL", &self.base_url)?;
        ValidationErrorHandler::validate_timeout(self.timeout)
    }
}

fn validate_page_size(name: &str, page_size: u32) -> Result<()> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(CollectorError::Validation(format!(
            "{} must be between 1 and {}",
            name, MAX_PAGE_SIZE
        )));
    }
    Ok(())
}

/// Settings for the authenticated collector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectConfig {
    pub hub: HubConfig,
    pub namespaces: Vec<String>,
    pub output: PathBuf,
    pub page_size: u32,
    pub tag_page_size: u32,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            hub: HubConfig::default(),
            namespaces: DEFAULT_NAMESPACES.iter().map(|ns| ns.to_string()).collect(),
            output: PathBuf::from("docker_hub_data.json"),
            page_size: MAX_PAGE_SIZE,
            tag_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl CollectConfig {
    pub fn validate(&self) -> Result<()> {
        self.hub.validate()?;
        if self.namespaces.is_empty() {
            return Err(CollectorError::Validation(
                "At least one namespace is required".to_string(),
            ));
        }
        if let Some(bad) = self
            .namespaces
            .iter()
            .find(|ns| ns.is_empty() || ns.contains('/'))
        {
            return Err(CollectorError::Validation(format!(
                "Invalid namespace: '{}'",
                bad
            )));
        }
        validate_page_size("Page size", self.page_size)?;
        validate_page_size("Tag page size", self.tag_page_size)
    }
}

/// Settings for the namespace enumerator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamespaceConfig {
    pub hub: HubConfig,
    pub output: PathBuf,
    pub page_size: u32,
    pub max_pages: Option<u32>,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            hub: HubConfig::default(),
            output: PathBuf::from("docker_namespaces.json"),
            page_size: MAX_PAGE_SIZE,
            max_pages: None,
        }
    }
}

impl NamespaceConfig {
    pub fn validate(&self) -> Result<()> {
        self.hub.validate()?;
        validate_page_size("Page size", self.page_size)?;
        if self.max_pages == Some(0) {
            return Err(CollectorError::Validation(
                "max_pages must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the browser-driven page scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    pub site_url: String,
    pub webdriver_url: String,
    /// Driver executable to spawn; when unset an already running driver is used
    pub driver_path: Option<PathBuf>,
    pub csv_path: PathBuf,
    pub write_rows: bool,
    pub snapshot_dir: PathBuf,
    /// Pages after this one are scrolled and snapshotted before parsing
    pub snapshot_after: u32,
    /// Seconds to wait for the first result card
    pub ready_timeout: u64,
    /// Milliseconds to let lazy-loaded content settle after scrolling
    pub scroll_settle: u64,
    pub max_pages: Option<u32>,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            site_url: DEFAULT_HUB_URL.to_string(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            driver_path: None,
            csv_path: PathBuf::from("results.csv"),
            write_rows: false,
            snapshot_dir: PathBuf::from("."),
            snapshot_after: 9,
            ready_timeout: 60,
            scroll_settle: 2000,
            max_pages: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScrapeConfig {
    pub fn search_page_url(&self, page: u32) -> String {
        format!(
            "{}/search?q=&type=image&page={}",
            self.site_url.trim_end_matches('/'),
            page
        )
    }

    pub fn validate(&self) -> Result<()> {
        ValidationErrorHandler::validate_base_url("Site URL", &self.site_url)?;
        ValidationErrorHandler::validate_base_url("WebDriver URL", &self.webdriver_url)?;
        ValidationErrorHandler::validate_timeout(self.ready_timeout)?;
        if self.max_pages == Some(0) {
            return Err(CollectorError::Validation(
                "max_pages must be greater than 0".to_string(),
            ));
        }
        if let Some(path) = &self.driver_path {
            if !path.is_file() {
                return Err(CollectorError::Validation(format!(
                    "Driver executable not found: {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}
