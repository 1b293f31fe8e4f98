//! Browser-driven scraper for the Docker Hub search pages
//!
//! Pages are visited in order starting at 1 until one renders no result cards.
//! Per-card extraction failures are logged and skipped; a failure to load or
//! read a page ends the run.

pub mod browser;
pub mod output;
pub mod parser;

pub use browser::{PageSource, WebDriverSource};
pub use output::RowWriter;
pub use parser::{ScrapedImage, parse_page};

use crate::cli::config::ScrapeConfig;
use crate::common::{PathUtils, Timer};
use crate::error::Result;
use crate::logging::Logger;
use parser::RESULT_CARD_SELECTOR;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    /// Pages that produced at least one result card
    pub pages: u32,
    pub images: usize,
    pub failed_cards: usize,
    pub rows_written: usize,
    pub snapshots: Vec<PathBuf>,
}

pub struct Scraper<S: PageSource> {
    source: S,
    config: ScrapeConfig,
    output: Logger,
}

impl<S: PageSource> Scraper<S> {
    pub fn new(source: S, config: ScrapeConfig, output: Logger) -> Self {
        Self {
            source,
            config,
            output,
        }
    }

    /// Scrape until an empty page, then close the page source
    pub async fn run(mut self) -> Result<ScrapeSummary> {
        let result = match RowWriter::open(&self.config.csv_path, self.config.write_rows) {
            Ok(mut rows) => {
                self.output.verbose(&format!(
                    "Scraped rows go to {} (row writing {})",
                    rows.path().display(),
                    if self.config.write_rows { "enabled" } else { "disabled" }
                ));
                let scraped = self.scrape_pages(&mut rows).await;
                let finished = rows.finish();
                scraped.and_then(|summary| {
                    finished.map(|rows_written| ScrapeSummary {
                        rows_written,
                        ..summary
                    })
                })
            }
            Err(e) => Err(e),
        };

        if let Err(e) = self.source.close().await {
            self.output
                .warning(&format!("Failed to close browser session: {}", e));
        }

        result
    }

    async fn scrape_pages(&mut self, rows: &mut RowWriter) -> Result<ScrapeSummary> {
        let mut summary = ScrapeSummary::default();
        let mut page = 1u32;

        loop {
            if let Some(max) = self.config.max_pages {
                if page > max {
                    self.output
                        .info(&format!("Reached page limit ({}). Stopping.", max));
                    break;
                }
            }

            self.output.info(&format!("Loading page {}...", page));
            let html = match self.load_page(page, &mut summary).await {
                Ok(html) => html,
                Err(e) => {
                    self.output
                        .error(&format!("Error loading page {}: {}", page, e));
                    return Err(e);
                }
            };

            let parse_timer = Timer::start(format!("Parsing page {}", page));
            let cards = parser::parse_page(&html);
            parse_timer.log_elapsed(&self.output);

            if cards.is_empty() {
                self.output
                    .info(&format!("No more images found on page {}. Stopping.", page));
                break;
            }

            for card in cards {
                match card {
                    Ok(image) => {
                        output::print_image(&image);
                        rows.write(&image)?;
                        summary.images += 1;
                    }
                    Err(e) => {
                        self.output.error(&format!("Error processing image: {}", e));
                        summary.failed_cards += 1;
                    }
                }
            }

            summary.pages = page;
            page += 1;
        }

        Ok(summary)
    }

    async fn load_page(&mut self, page: u32, summary: &mut ScrapeSummary) -> Result<String> {
        let url = self.config.search_page_url(page);
        let load_timer = Timer::start(format!("Page {} load", page));

        self.source.open(&url).await?;
        let ready = self
            .source
            .wait_until_ready(
                RESULT_CARD_SELECTOR,
                Duration::from_secs(self.config.ready_timeout),
            )
            .await?;
        if !ready {
            self.output.verbose(&format!(
                "No result cards appeared on page {} within {}s",
                page, self.config.ready_timeout
            ));
        }
        load_timer.log_elapsed(&self.output);

        if page <= self.config.snapshot_after {
            return self.source.page_source().await;
        }

        let scroll_timer = Timer::start(format!("Scrolling page {}", page));
        self.source.scroll_to_bottom().await?;
        tokio::time::sleep(Duration::from_millis(self.config.scroll_settle)).await;
        scroll_timer.log_elapsed(&self.output);

        let html = self.source.page_source().await?;

        PathUtils::ensure_dir_exists(&self.config.snapshot_dir)?;
        let snapshot = self.config.snapshot_dir.join(format!("page_{}.html", page));
        tokio::fs::write(&snapshot, &html).await?;
        self.output
            .detail(&format!("Saved page snapshot to {}", snapshot.display()));
        summary.snapshots.push(snapshot);

        Ok(html)
    }
}
