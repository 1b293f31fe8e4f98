//! Authenticated collector: every repository of every configured namespace

use crate::cli::config::{AuthConfig, CollectConfig};
use crate::error::Result;
use crate::hub::client::HubClient;
use crate::hub::models::ImageRecord;
use crate::logging::{Logger, ProgressState};
use crate::output;
use std::path::PathBuf;

/// JSON indent width used for `docker_hub_data.json`
pub const COLLECT_JSON_INDENT: usize = 2;

#[derive(Debug, Clone)]
pub struct CollectSummary {
    pub namespaces: usize,
    pub records: usize,
    pub output: PathBuf,
}

pub struct Collector {
    client: HubClient,
    config: CollectConfig,
    output: Logger,
}

impl Collector {
    pub fn new(config: CollectConfig, output: Logger) -> Result<Self> {
        config.validate()?;
        let client = HubClient::builder(config.hub.clone())
            .with_page_size(config.page_size)
            .with_tag_page_size(config.tag_page_size)
            .with_output(output.clone())
            .build()?;

        Ok(Self {
            client,
            config,
            output,
        })
    }

    /// Authenticate and gather records for all namespaces, in order
    pub async fn collect_all(&self, credentials: &AuthConfig) -> Result<Vec<ImageRecord>> {
        self.output.step("Authenticating with Docker Hub");
        let token = self.client.authenticate(credentials).await?;
        self.output.success("Authentication successful");

        let mut records = Vec::new();
        let mut namespace_progress =
            ProgressState::new("Processing namespaces", self.config.namespaces.len());

        for namespace in &self.config.namespaces {
            self.output
                .subsection(&format!("Collecting data for namespace: {}", namespace));

            let repositories = self.client.list_repositories(namespace, &token).await?;
            let mut repo_progress = ProgressState::new(namespace.as_str(), repositories.len());

            for repository in &repositories {
                let record = self
                    .client
                    .collect(namespace, &repository.name, &token)
                    .await?;
                records.push(record);
                repo_progress.advance();
                self.output.display_live_progress(&repo_progress);
            }

            namespace_progress.advance();
            self.output.info(&format!(
                "{}: {} repositories ({}/{} namespaces)",
                namespace,
                repositories.len(),
                namespace_progress.completed,
                namespace_progress.total
            ));
        }

        Ok(records)
    }

    /// Full run: collect everything, then write the JSON array once
    pub async fn run(&self, credentials: &AuthConfig) -> Result<CollectSummary> {
        let records = self.collect_all(credentials).await?;

        output::write_json(&self.config.output, &records, COLLECT_JSON_INDENT)?;
        self.output.success(&format!(
            "Data successfully saved to {}",
            self.config.output.display()
        ));

        Ok(CollectSummary {
            namespaces: self.config.namespaces.len(),
            records: records.len(),
            output: self.config.output.clone(),
        })
    }
}
