//! Command line interface module
//!
//! This module provides argument parsing, configuration, and the runner that
//! dispatches each subcommand to its collector.

pub mod args;
pub mod config;
pub mod runner;

pub use args::{Args, Command};
pub use config::{AuthConfig, CollectConfig, HubConfig, NamespaceConfig, ScrapeConfig};
pub use runner::Runner;
