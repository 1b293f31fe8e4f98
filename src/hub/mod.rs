//! Docker Hub API collectors
//!
//! This module provides the login and repository client for the Docker Hub HTTP API,
//! the authenticated collector that walks configured namespaces, and the
//! unauthenticated namespace enumerator built on the public search endpoint.

pub mod auth;
pub mod client;
pub mod collector;
pub mod models;
pub mod search;

pub use auth::Auth;
pub use client::{HubClient, HubClientBuilder};
pub use collector::{CollectSummary, Collector};
pub use models::{ImageRecord, RepositoryDetail, RepositorySummary};
pub use search::{EnumerateSummary, NamespaceEnumerator};
