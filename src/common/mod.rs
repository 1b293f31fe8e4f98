//! Common module - shared utilities
//!
//! Small helpers used by more than one collector.

pub mod utils;

pub use utils::*;
