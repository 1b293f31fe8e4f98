//! HTTP client for the Docker Hub repository API
//!
//! Each call is a single blocking-in-sequence request with no retry. Listing
//! follows the server supplied `next` cursor until it runs out.

use crate::cli::config::{AuthConfig, HubConfig, MAX_PAGE_SIZE};
use crate::error::handlers::{HttpErrorHandler, NetworkErrorHandler};
use crate::error::{CollectorError, Result};
use crate::hub::auth::Auth;
use crate::hub::models::{ImageRecord, RepositoryDetail, RepositoryPage, RepositorySummary, TagPage};
use crate::logging::Logger;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

pub struct HubClientBuilder {
    config: HubConfig,
    page_size: u32,
    tag_page_size: u32,
    output: Logger,
}

impl HubClientBuilder {
    pub fn new(config: HubConfig) -> Self {
        Self {
            config,
            page_size: MAX_PAGE_SIZE,
            tag_page_size: MAX_PAGE_SIZE,
            output: Logger::default(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_tag_page_size(mut self, tag_page_size: u32) -> Self {
        self.tag_page_size = tag_page_size;
        self
    }

    pub fn with_output(mut self, output: Logger) -> Self {
        self.output = output;
        self
    }

    pub fn build(self) -> Result<HubClient> {
        self.config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout))
            .user_agent(self.config.user_agent.clone())
            .build()
            .map_err(|e| CollectorError::Network(format!("Failed to create HTTP client: {}", e)))?;

        // a trailing slash keeps Url::join from dropping the last path segment
        let base_url = Url::parse(&format!("{}/", self.config.base()))?;
        let auth = Auth::new(client.clone(), &base_url)?;

        Ok(HubClient {
            client,
            base_url,
            auth,
            page_size: self.page_size,
            tag_page_size: self.tag_page_size,
            output: self.output,
        })
    }
}

pub struct HubClient {
    client: Client,
    base_url: Url,
    auth: Auth,
    page_size: u32,
    tag_page_size: u32,
    output: Logger,
}

impl HubClient {
    pub fn builder(config: HubConfig) -> HubClientBuilder {
        HubClientBuilder::new(config)
    }

    /// Log in and return the bearer token used by every other call
    pub async fn authenticate(&self, credentials: &AuthConfig) -> Result<String> {
        self.auth
            .login(&credentials.username, &credentials.password, &self.output)
            .await
    }

    /// List every repository in `namespace`, following `next` until exhausted
    pub async fn list_repositories(
        &self,
        namespace: &str,
        token: &str,
    ) -> Result<Vec<RepositorySummary>> {
        let mut url = self.endpoint(&["v2", "repositories", namespace])?;
        url.query_pairs_mut()
            .append_pair("page_size", &self.page_size.to_string());

        let mut repositories = Vec::new();
        let mut next = Some(url);
        let mut page = 0usize;

        while let Some(url) = next.take() {
            page += 1;
            self.output
                .detail(&format!("Listing {} (page {}): {}", namespace, page, url));

            let body: RepositoryPage = self
                .get_json(url, token, "repository listing")
                .await?;
            repositories.extend(body.results);

            next = match body.next.as_deref() {
                Some(cursor) if !cursor.is_empty() => Some(self.base_url.join(cursor)?),
                _ => None,
            };
        }

        self.output.verbose(&format!(
            "Found {} repositories in namespace {} ({} pages)",
            repositories.len(),
            namespace,
            page
        ));

        Ok(repositories)
    }

    pub async fn fetch_repository_detail(
        &self,
        namespace: &str,
        repository: &str,
        token: &str,
    ) -> Result<RepositoryDetail> {
        let url = self.endpoint(&["v2", "repositories", namespace, repository])?;
        self.get_json(url, token, "repository detail").await
    }

    /// Names of the first page of tags; unnamed entries are skipped
    pub async fn fetch_tags(
        &self,
        namespace: &str,
        repository: &str,
        token: &str,
    ) -> Result<Vec<String>> {
        let mut url = self.endpoint(&["v2", "repositories", namespace, repository, "tags"])?;
        url.query_pairs_mut()
            .append_pair("page_size", &self.tag_page_size.to_string());

        let body: TagPage = self.get_json(url, token, "tag listing").await?;
        Ok(body.results.into_iter().filter_map(|tag| tag.name).collect())
    }

    /// Fetch detail and tags for one repository and assemble its record
    pub async fn collect(
        &self,
        namespace: &str,
        repository: &str,
        token: &str,
    ) -> Result<ImageRecord> {
        let detail = self
            .fetch_repository_detail(namespace, repository, token)
            .await?;
        let tags = self.fetch_tags(namespace, repository, token).await?;

        self.output.detail(&format!(
            "Collected {}/{} with {} tags",
            namespace,
            repository,
            tags.len()
        ));

        Ok(ImageRecord::assemble(namespace, repository, detail, tags))
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                CollectorError::Validation(format!("Base URL cannot hold a path: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, token: &str, operation: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, operation))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            self.output
                .error(&format!("{} failed: HTTP {}", operation, status));
            return Err(HttpErrorHandler::handle_request_error(status, &error_text, operation));
        }

        let body = response
            .text()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, operation))?;

        serde_json::from_str(&body).map_err(|e| {
            CollectorError::Parse(format!("Failed to parse {} response: {}", operation, e))
        })
    }
}
