//! Command-line argument parsing

use crate::cli::config::{
    CollectConfig, DEFAULT_HUB_URL, DEFAULT_WEBDRIVER_URL, HubConfig, NamespaceConfig,
    ScrapeConfig,
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docker-hub-collector")]
#[command(about = "Collect public Docker Hub image metadata into JSON and CSV files")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output
    #[arg(long = "verbose", short = 'v', global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Quiet mode
    #[arg(
        long = "quiet",
        short = 'q',
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors and scraped rows"
    )]
    pub quiet: bool,

    /// Timeout in seconds for network operations
    #[arg(
        long = "timeout",
        short = 't',
        global = true,
        default_value = "300",
        help = "Timeout for HTTP requests in seconds"
    )]
    pub timeout: u64,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Collect repository metadata for a list of namespaces (requires credentials)
    Collect(CollectArgs),
    /// Enumerate publisher namespaces through the public search API
    Namespaces(NamespaceArgs),
    /// Scrape the search result pages through a WebDriver-controlled browser
    Scrape(ScrapeArgs),
}

#[derive(ClapArgs, Debug)]
pub struct CollectArgs {
    /// Namespaces to collect; defaults to library, nginx, mysql and alpine
    #[arg(long = "namespace", short = 'n', value_name = "NAMESPACE")]
    pub namespaces: Vec<String>,

    #[arg(long = "output", short = 'o', default_value = "docker_hub_data.json")]
    pub output: PathBuf,

    #[arg(long = "page-size", default_value = "100", help = "Repositories per listing page")]
    pub page_size: u32,

    #[arg(long = "tag-page-size", default_value = "100", help = "Tags fetched per repository")]
    pub tag_page_size: u32,

    #[arg(long = "base-url", default_value = DEFAULT_HUB_URL, env = "DOCKER_HUB_BASE_URL")]
    pub base_url: String,
}

#[derive(ClapArgs, Debug)]
pub struct NamespaceArgs {
    #[arg(long = "output", short = 'o', default_value = "docker_namespaces.json")]
    pub output: PathBuf,

    #[arg(long = "page-size", default_value = "100", help = "Search results per page")]
    pub page_size: u32,

    #[arg(long = "max-pages", help = "Stop after this many search pages")]
    pub max_pages: Option<u32>,

    #[arg(long = "base-url", default_value = DEFAULT_HUB_URL, env = "DOCKER_HUB_BASE_URL")]
    pub base_url: String,
}

#[derive(ClapArgs, Debug)]
pub struct ScrapeArgs {
    #[arg(long = "site-url", default_value = DEFAULT_HUB_URL)]
    pub site_url: String,

    #[arg(long = "webdriver-url", default_value = DEFAULT_WEBDRIVER_URL)]
    pub webdriver_url: String,

    #[arg(long = "driver-path", help = "Spawn this chromedriver executable before connecting")]
    pub driver_path: Option<PathBuf>,

    #[arg(long = "csv", default_value = "results.csv")]
    pub csv: PathBuf,

    #[arg(long = "write-rows", help = "Append scraped rows to the CSV file")]
    pub write_rows: bool,

    #[arg(long = "snapshot-dir", default_value = ".")]
    pub snapshot_dir: PathBuf,

    #[arg(
        long = "snapshot-after",
        default_value = "9",
        help = "Scroll and save raw HTML for pages after this one"
    )]
    pub snapshot_after: u32,

    #[arg(
        long = "ready-timeout",
        default_value = "60",
        help = "Seconds to wait for result cards to render"
    )]
    pub ready_timeout: u64,

    #[arg(
        long = "scroll-settle",
        default_value = "2000",
        help = "Milliseconds to wait after scrolling"
    )]
    pub scroll_settle: u64,

    #[arg(long = "max-pages", help = "Stop after this many pages")]
    pub max_pages: Option<u32>,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Apply environment overrides the way flags cannot express
    pub fn from_env(mut self) -> Self {
        let verbose_env = std::env::var("DOCKER_HUB_VERBOSE").ok();
        if verbose_env.as_deref().is_some_and(env_flag) && !self.quiet {
            self.verbose = true;
        }

        if let Ok(timeout) = std::env::var("DOCKER_HUB_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.timeout = t;
            }
        }

        self
    }

    fn hub_config(&self, base_url: &str) -> HubConfig {
        HubConfig::new(base_url).with_timeout(self.timeout)
    }
}

/// Boolean reading of an environment flag; unrecognized values count as off
fn env_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

impl CollectArgs {
    pub fn to_config(&self, args: &Args) -> CollectConfig {
        let defaults = CollectConfig::default();
        CollectConfig {
            hub: args.hub_config(&self.base_url),
            namespaces: if self.namespaces.is_empty() {
                defaults.namespaces
            } else {
                self.namespaces.clone()
            },
            output: self.output.clone(),
            page_size: self.page_size,
            tag_page_size: self.tag_page_size,
        }
    }
}

impl NamespaceArgs {
    pub fn to_config(&self, args: &Args) -> NamespaceConfig {
        NamespaceConfig {
            hub: args.hub_config(&self.base_url),
            output: self.output.clone(),
            page_size: self.page_size,
            max_pages: self.max_pages,
        }
    }
}

impl ScrapeArgs {
    pub fn to_config(&self) -> ScrapeConfig {
        ScrapeConfig {
            site_url: self.site_url.clone(),
            webdriver_url: self.webdriver_url.clone(),
            driver_path: self.driver_path.clone(),
            csv_path: self.csv.clone(),
            write_rows: self.write_rows,
            snapshot_dir: self.snapshot_dir.clone(),
            snapshot_after: self.snapshot_after,
            ready_timeout: self.ready_timeout,
            scroll_settle: self.scroll_settle,
            max_pages: self.max_pages,
            ..ScrapeConfig::default()
        }
    }
}
