//! Integration tests for the page scraper driven by an in-memory page source.

use async_trait::async_trait;
use docker_hub_collector::cli::config::ScrapeConfig;
use docker_hub_collector::scrape::{PageSource, Scraper};
use docker_hub_collector::{CollectorError, Logger, Result};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Default)]
struct Calls {
    opened: Vec<String>,
    scrolls: usize,
    closed: bool,
}

/// Serves canned pages in order; `None` simulates a page that fails to load
struct FakeSource {
    pages: VecDeque<Option<String>>,
    current: Option<String>,
    calls: Arc<Mutex<Calls>>,
}

impl FakeSource {
    fn new(pages: Vec<Option<String>>) -> (Self, Arc<Mutex<Calls>>) {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let source = Self {
            pages: pages.into(),
            current: None,
            calls: Arc::clone(&calls),
        };
        (source, calls)
    }
}

#[async_trait]
impl PageSource for FakeSource {
    async fn open(&mut self, url: &str) -> Result<()> {
        self.calls.lock().unwrap().opened.push(url.to_string());
        match self.pages.pop_front() {
            Some(Some(html)) => {
                self.current = Some(html);
                Ok(())
            }
            Some(None) => Err(CollectorError::Browser("net::ERR_CONNECTION_RESET".to_string())),
            None => panic!("scraper requested more pages than were served: {url}"),
        }
    }

    async fn wait_until_ready(&mut self, _selector: &str, _timeout: Duration) -> Result<bool> {
        Ok(self
            .current
            .as_deref()
            .is_some_and(|html| html.contains("imageSearchResult")))
    }

    async fn scroll_to_bottom(&mut self) -> Result<()> {
        self.calls.lock().unwrap().scrolls += 1;
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String> {
        Ok(self.current.clone().unwrap_or_default())
    }

    async fn close(&mut self) -> Result<()> {
        self.calls.lock().unwrap().closed = true;
        Ok(())
    }
}

fn card(name: &str) -> String {
    format!(
        r#"<a data-testid="imageSearchResult" href="/r/acme/{name}">
             <strong data-testid="product-title">{name}</strong>
             <div><a data-testid="org-link" href="/u/acme">acme</a></div>
             <div class="MuiTypography-root MuiTypography-body1 css-mysnhd">The {name} image</div>
             <div data-testid="product-badges-and-data-count">
               <p class="MuiTypography-root css-1xp8ea0">10K+</p>
             </div>
             <div class="MuiStack-root css-tehqbb"><strong>42</strong></div>
             <div data-testid="productChip"><span>Linux</span></div>
           </a>"#
    )
}

fn broken_card() -> String {
    r#"<a data-testid="imageSearchResult"><div data-testid="productChip"></div></a>"#.to_string()
}

fn page(cards: &[String]) -> Option<String> {
    Some(format!(
        "<html><body><main>{}</main></body></html>",
        cards.concat()
    ))
}

fn empty_page() -> Option<String> {
    Some("<html><body><p>No results found</p></body></html>".to_string())
}

fn config(dir: &Path) -> ScrapeConfig {
    ScrapeConfig {
        site_url: "https://hub.example.test".to_string(),
        csv_path: dir.join("results.csv"),
        snapshot_dir: dir.join("snapshots"),
        scroll_settle: 0,
        ready_timeout: 1,
        ..ScrapeConfig::default()
    }
}

#[tokio::test]
async fn test_stops_on_first_empty_page() {
    let dir = tempfile::tempdir().unwrap();
    let (source, calls) = FakeSource::new(vec![
        page(&[card("one"), card("two")]),
        page(&[card("three")]),
        empty_page(),
    ]);

    let summary = Scraper::new(source, config(dir.path()), Logger::new_quiet())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.pages, 2);
    assert_eq!(summary.images, 3);
    assert_eq!(summary.failed_cards, 0);

    let calls = calls.lock().unwrap();
    assert_eq!(
        calls.opened,
        vec![
            "https://hub.example.test/search?q=&type=image&page=1",
            "https://hub.example.test/search?q=&type=image&page=2",
            "https://hub.example.test/search?q=&type=image&page=3",
        ]
    );
    assert!(calls.closed);
}

#[tokio::test]
async fn test_empty_first_page_loads_nothing_else() {
    let dir = tempfile::tempdir().unwrap();
    let (source, calls) = FakeSource::new(vec![empty_page()]);

    let summary = Scraper::new(source, config(dir.path()), Logger::new_quiet())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.pages, 0);
    assert_eq!(summary.images, 0);
    assert_eq!(calls.lock().unwrap().opened.len(), 1);
}

#[tokio::test]
async fn test_card_failure_does_not_abort_page() {
    let dir = tempfile::tempdir().unwrap();
    let (source, _calls) = FakeSource::new(vec![
        page(&[card("good"), broken_card(), card("also-good")]),
        empty_page(),
    ]);

    let summary = Scraper::new(source, config(dir.path()), Logger::new_quiet())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.images, 2);
    assert_eq!(summary.failed_cards, 1);
}

#[tokio::test]
async fn test_page_load_failure_aborts_run_and_closes_browser() {
    let dir = tempfile::tempdir().unwrap();
    let (source, calls) = FakeSource::new(vec![page(&[card("first")]), None]);

    let result = Scraper::new(source, config(dir.path()), Logger::new_quiet())
        .run()
        .await;

    assert!(matches!(result, Err(CollectorError::Browser(_))));
    let calls = calls.lock().unwrap();
    assert_eq!(calls.opened.len(), 2);
    assert!(calls.closed);
}

#[tokio::test]
async fn test_late_pages_are_scrolled_and_snapshotted() {
    let dir = tempfile::tempdir().unwrap();
    let (source, calls) = FakeSource::new(vec![
        page(&[card("p1")]),
        page(&[card("p2")]),
        page(&[card("p3")]),
        empty_page(),
    ]);

    let scrape_config = ScrapeConfig {
        snapshot_after: 1,
        ..config(dir.path())
    };
    let summary = Scraper::new(source, scrape_config, Logger::new_quiet())
        .run()
        .await
        .unwrap();

    let snapshots = dir.path().join("snapshots");
    assert!(!snapshots.join("page_1.html").exists());
    assert!(snapshots.join("page_2.html").exists());
    assert!(snapshots.join("page_3.html").exists());
    assert!(snapshots.join("page_4.html").exists());
    assert_eq!(summary.snapshots.len(), 3);
    assert_eq!(calls.lock().unwrap().scrolls, 3);

    let saved = std::fs::read_to_string(snapshots.join("page_2.html")).unwrap();
    assert!(saved.contains("p2"));
}

#[tokio::test]
async fn test_csv_gets_header_only_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let (source, _calls) = FakeSource::new(vec![page(&[card("one")]), empty_page()]);

    let summary = Scraper::new(source, config(dir.path()), Logger::new_quiet())
        .run()
        .await
        .unwrap();
    assert_eq!(summary.rows_written, 0);

    let csv = std::fs::read_to_string(dir.path().join("results.csv")).unwrap();
    assert_eq!(
        csv,
        "Image Name,Description,Pulls,Stars Count,Tags,By,Last Updated,Official Status\n"
    );
}

#[tokio::test]
async fn test_csv_rows_when_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let (source, _calls) = FakeSource::new(vec![page(&[card("one"), card("two")]), empty_page()]);

    let scrape_config = ScrapeConfig {
        write_rows: true,
        ..config(dir.path())
    };
    let summary = Scraper::new(source, scrape_config, Logger::new_quiet())
        .run()
        .await
        .unwrap();
    assert_eq!(summary.rows_written, 2);

    let csv = std::fs::read_to_string(dir.path().join("results.csv")).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "one,The one image,10K+,42,Linux,acme,N/A,Not Official");
}

#[tokio::test]
async fn test_max_pages_stops_early() {
    let dir = tempfile::tempdir().unwrap();
    let (source, calls) = FakeSource::new(vec![page(&[card("a")]), page(&[card("b")])]);

    let scrape_config = ScrapeConfig {
        max_pages: Some(1),
        ..config(dir.path())
    };
    let summary = Scraper::new(source, scrape_config, Logger::new_quiet())
        .run()
        .await
        .unwrap();

    assert_eq!(summary.pages, 1);
    assert_eq!(calls.lock().unwrap().opened.len(), 1);
}
