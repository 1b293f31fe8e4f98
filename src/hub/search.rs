//! Namespace enumerator over the public product search
//!
//! Pages through `/api/content/v1/products/search` without authentication and
//! gathers distinct publisher names. A non-200 status, an unreadable payload
//! or an empty `summaries` list ends the walk; none of those are errors.

use crate::cli::config::NamespaceConfig;
use crate::error::handlers::NetworkErrorHandler;
use crate::error::{CollectorError, Result};
use crate::hub::models::SearchPage;
use crate::logging::Logger;
use crate::output;
use reqwest::{Client, StatusCode};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// JSON indent width used for `docker_namespaces.json`
pub const NAMESPACES_JSON_INDENT: usize = 4;

#[derive(Debug, Clone)]
pub struct EnumerateSummary {
    pub pages: u32,
    pub namespaces: usize,
    pub output: PathBuf,
}

/// Why a page ended the walk
#[derive(Debug, Clone, PartialEq, Eq)]
enum PageOutcome {
    Names(Vec<String>),
    Stop(String),
}

pub struct NamespaceEnumerator {
    client: Client,
    search_url: Url,
    config: NamespaceConfig,
    output: Logger,
}

impl NamespaceEnumerator {
    pub fn new(config: NamespaceConfig, output: Logger) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.hub.timeout))
            .user_agent(config.hub.user_agent.clone())
            .build()
            .map_err(|e| CollectorError::Network(format!("Failed to create HTTP client: {}", e)))?;

        let search_url = Url::parse(&format!(
            "{}/api/content/v1/products/search",
            config.hub.base()
        ))?;

        Ok(Self {
            client,
            search_url,
            config,
            output,
        })
    }

    fn page_url(&self, page: u32) -> Url {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .append_pair("q", "")
            .append_pair("type", "image")
            .append_pair("page_size", &self.config.page_size.to_string())
            .append_pair("page", &page.to_string());
        url
    }

    async fn fetch_page(&self, page: u32) -> Result<PageOutcome> {
        let url = self.page_url(page);
        self.output.detail(&format!("Fetching search page {}: {}", page, url));

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, "namespace search"))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Ok(PageOutcome::Stop(format!("status {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| NetworkErrorHandler::handle_network_error(&e, "namespace search"))?;

        let parsed: Option<SearchPage> = match serde_json::from_str(&body) {
            Ok(parsed) => parsed,
            Err(e) => return Ok(PageOutcome::Stop(format!("invalid payload: {}", e))),
        };

        let summaries = match parsed.and_then(|p| p.summaries) {
            Some(summaries) if !summaries.is_empty() => summaries,
            _ => return Ok(PageOutcome::Stop("no more results".to_string())),
        };

        Ok(PageOutcome::Names(
            summaries
                .into_iter()
                .filter_map(|summary| summary.publisher.and_then(|p| p.name))
                .collect(),
        ))
    }

    /// Walk search pages from 1 and return every distinct publisher name
    pub async fn enumerate_namespaces(&self) -> Result<(BTreeSet<String>, u32)> {
        let mut namespaces = BTreeSet::new();
        let mut page = 1u32;

        loop {
            if let Some(max) = self.config.max_pages {
                if page > max {
                    self.output
                        .verbose(&format!("Reached page limit ({}), stopping", max));
                    break;
                }
            }

            match self.fetch_page(page).await? {
                PageOutcome::Names(names) => {
                    let before = namespaces.len();
                    namespaces.extend(names);
                    self.output.verbose(&format!(
                        "Page {}: {} new namespaces ({} total)",
                        page,
                        namespaces.len() - before,
                        namespaces.len()
                    ));
                }
                PageOutcome::Stop(reason) => {
                    self.output
                        .verbose(&format!("Stopping at page {}: {}", page, reason));
                    break;
                }
            }

            page += 1;
        }

        Ok((namespaces, page - 1))
    }

    /// Enumerate and write the names as a JSON array
    pub async fn run(&self) -> Result<EnumerateSummary> {
        let (namespaces, pages) = self.enumerate_namespaces().await?;
        let names: Vec<&String> = namespaces.iter().collect();

        output::write_json(&self.config.output, &names, NAMESPACES_JSON_INDENT)?;
        self.output.success(&format!(
            "Namespaces saved to {}",
            self.config.output.display()
        ));

        Ok(EnumerateSummary {
            pages,
            namespaces: namespaces.len(),
            output: self.config.output.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        let config = NamespaceConfig {
            hub: crate::cli::config::HubConfig::new("https://hub.docker.com/"),
            page_size: 25,
            ..NamespaceConfig::default()
        };
        let enumerator = NamespaceEnumerator::new(config, Logger::new_quiet()).unwrap();
        assert_eq!(
            enumerator.page_url(7).as_str(),
            "https://hub.docker.com/api/content/v1/products/search?q=&type=image&page_size=25&page=7"
        );
    }
}
