//! Runner dispatching each subcommand to its collector

use crate::cli::args::{Args, Command};
use crate::cli::config::AuthConfig;
use crate::error::Result;
use crate::hub::{Collector, NamespaceEnumerator};
use crate::logging::Logger;
use crate::scrape::{Scraper, WebDriverSource};

pub struct Runner {
    args: Args,
    output: Logger,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        let output = if args.quiet {
            Logger::new_quiet()
        } else {
            Logger::new(args.verbose)
        };

        Self { args, output }
    }

    pub fn output(&self) -> &Logger {
        &self.output
    }

    pub async fn run(&self) -> Result<()> {
        match &self.args.command {
            Command::Collect(collect) => {
                self.output.section("Docker Hub Collector");
                let config = collect.to_config(&self.args);
                config.validate()?;
                self.output.info(&format!(
                    "Namespaces: {}",
                    config.namespaces.join(", ")
                ));

                let credentials = AuthConfig::from_env()?;
                let collector = Collector::new(config, self.output.clone())?;
                let summary = collector.run(&credentials).await?;

                self.output.summary_kv(
                    "Collection Summary",
                    &[
                        ("Namespaces", summary.namespaces.to_string()),
                        ("Records", summary.records.to_string()),
                        ("Output", summary.output.display().to_string()),
                        ("Elapsed", self.output.format_duration(self.output.elapsed())),
                    ],
                );
            }
            Command::Namespaces(namespaces) => {
                self.output.section("Docker Hub Namespace Enumerator");
                let config = namespaces.to_config(&self.args);
                let enumerator = NamespaceEnumerator::new(config, self.output.clone())?;
                let summary = enumerator.run().await?;

                self.output.summary_kv(
                    "Enumeration Summary",
                    &[
                        ("Pages", summary.pages.to_string()),
                        ("Namespaces", summary.namespaces.to_string()),
                        ("Output", summary.output.display().to_string()),
                        ("Elapsed", self.output.format_duration(self.output.elapsed())),
                    ],
                );
            }
            Command::Scrape(scrape) => {
                self.output.section("Docker Hub Page Scraper");
                let config = scrape.to_config();
                config.validate()?;

                let source = WebDriverSource::connect(&config, self.output.clone()).await?;
                let summary = Scraper::new(source, config, self.output.clone())
                    .run()
                    .await?;

                self.output.summary_kv(
                    "Scrape Summary",
                    &[
                        ("Pages", summary.pages.to_string()),
                        ("Images", summary.images.to_string()),
                        ("Failed cards", summary.failed_cards.to_string()),
                        ("Rows written", summary.rows_written.to_string()),
                        ("Snapshots", summary.snapshots.len().to_string()),
                        ("Elapsed", self.output.format_duration(self.output.elapsed())),
                    ],
                );
            }
        }

        Ok(())
    }
}
