//! Rendered page sources for the scraper
//!
//! [`PageSource`] is the seam between the scraping loop and the browser. The
//! WebDriver implementation drives headless Chrome through a chromedriver
//! endpoint, optionally spawning the driver executable itself.

use crate::cli::config::ScrapeConfig;
use crate::error::{CollectorError, Result};
use crate::logging::Logger;
use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::{Child, Command};

const SCROLL_TO_BOTTOM: &str = "window.scrollTo(0, document.body.scrollHeight);";
const DRIVER_STARTUP_TIMEOUT: Duration = Duration::from_secs(10);
const DRIVER_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Anything that can render a search page and hand back its markup
#[async_trait]
pub trait PageSource: Send {
    /// Navigate to `url`
    async fn open(&mut self, url: &str) -> Result<()>;

    /// Wait for an element matching `selector`; `false` when the timeout elapses first
    async fn wait_until_ready(&mut self, selector: &str, timeout: Duration) -> Result<bool>;

    /// Scroll to the end of the document to trigger lazy loading
    async fn scroll_to_bottom(&mut self) -> Result<()>;

    /// Current serialized DOM
    async fn page_source(&mut self) -> Result<String>;

    /// End the session and release the driver
    async fn close(&mut self) -> Result<()>;
}

/// Chrome options matching the flags the scraper has always run with
pub fn chrome_capabilities(user_agent: &str) -> Capabilities {
    let mut caps = Capabilities::new();
    caps.insert("browserName".to_string(), json!("chrome"));
    caps.insert(
        "goog:chromeOptions".to_string(),
        json!({
            "args": [
                "--headless",
                "--no-sandbox",
                "--disable-dev-shm-usage",
                "--disable-javascript",
                "--disable-gpu",
                format!("user-agent={}", user_agent),
                "--disable-extensions",
                "--proxy-server=direct://",
            ]
        }),
    );
    caps
}

pub struct WebDriverSource {
    client: Option<Client>,
    driver: Option<Child>,
    output: Logger,
}

impl WebDriverSource {
    /// Start (if configured) the driver and open a browser session
    pub async fn connect(config: &ScrapeConfig, output: Logger) -> Result<Self> {
        let driver = match &config.driver_path {
            Some(path) => {
                let port = url::Url::parse(&config.webdriver_url)?
                    .port_or_known_default()
                    .ok_or_else(|| {
                        CollectorError::Validation(format!(
                            "WebDriver URL has no port: {}",
                            config.webdriver_url
                        ))
                    })?;
                output.step(&format!("Starting driver {} on port {}", path.display(), port));
                let child = Command::new(path)
                    .arg(format!("--port={}", port))
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .kill_on_drop(true)
                    .spawn()
                    .map_err(|e| {
                        CollectorError::Browser(format!(
                            "Failed to start driver {}: {}",
                            path.display(),
                            e
                        ))
                    })?;
                Some(child)
            }
            None => None,
        };

        let mut builder = ClientBuilder::native();
        builder.capabilities(chrome_capabilities(&config.user_agent));

        // a freshly spawned driver needs a moment before it accepts sessions
        let deadline = Instant::now() + DRIVER_STARTUP_TIMEOUT;
        let client = loop {
            match builder.connect(&config.webdriver_url).await {
                Ok(client) => break client,
                Err(e) if driver.is_some() && Instant::now() < deadline => {
                    output.debug(&format!("Driver not ready yet: {}", e));
                    tokio::time::sleep(DRIVER_POLL_INTERVAL).await;
                }
                Err(e) => return Err(e.into()),
            }
        };

        output.success(&format!("Browser session started via {}", config.webdriver_url));

        Ok(Self {
            client: Some(client),
            driver,
            output,
        })
    }

    fn client(&self) -> Result<&Client> {
        self.client
            .as_ref()
            .ok_or_else(|| CollectorError::Browser("Browser session already closed".to_string()))
    }
}

#[async_trait]
impl PageSource for WebDriverSource {
    async fn open(&mut self, url: &str) -> Result<()> {
        self.client()?.goto(url).await?;
        Ok(())
    }

    async fn wait_until_ready(&mut self, selector: &str, timeout: Duration) -> Result<bool> {
        let waited = self
            .client()?
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await;

        match waited {
            Ok(_) => Ok(true),
            Err(CmdError::WaitTimeout) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        self.client()?.execute(SCROLL_TO_BOTTOM, Vec::new()).await?;
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String> {
        Ok(self.client()?.source().await?)
    }

    async fn close(&mut self) -> Result<()> {
        let closed = match self.client.take() {
            Some(client) => client.close().await.map_err(CollectorError::from),
            None => Ok(()),
        };

        if let Some(mut driver) = self.driver.take() {
            if let Err(e) = driver.kill().await {
                self.output
                    .warning(&format!("Failed to stop driver process: {}", e));
            }
        }

        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrome_capabilities() {
        let caps = chrome_capabilities("agent/1.0");
        assert_eq!(caps["browserName"], "chrome");
        let args = caps["goog:chromeOptions"]["args"].as_array().unwrap();
        assert!(args.iter().any(|a| a == "--headless"));
        assert!(args.iter().any(|a| a == "user-agent=agent/1.0"));
    }
}
