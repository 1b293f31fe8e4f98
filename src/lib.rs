//! Docker Hub Collector Library
//!
//! This file serves as the library root for the docker-hub-collector crate,
//! organizing and exposing the authenticated API collector, the namespace
//! enumerator and the browser-driven page scraper.

pub mod cli;
pub mod common;
pub mod error;
pub mod hub;
pub mod logging;
pub mod output;
pub mod scrape;

pub use error::{CollectorError, Result};
pub use hub::{Collector, HubClient, ImageRecord, NamespaceEnumerator};
pub use logging::Logger;
pub use scrape::{PageSource, ScrapedImage, Scraper};
