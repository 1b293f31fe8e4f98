//! Common utilities and helper functions

use crate::error::{CollectorError, Result};
use crate::logging::Logger;
use std::path::Path;
use std::time::{Duration, Instant};

/// Timing utilities
pub struct Timer {
    start: Instant,
    description: String,
}

impl Timer {
    /// Start a new timer
    pub fn start(description: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            description: description.into(),
        }
    }

    /// Get elapsed time
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Log elapsed time using provided logger
    pub fn log_elapsed(&self, logger: &Logger) {
        logger.verbose(&format!(
            "{} took: {}",
            self.description,
            logger.format_duration(self.elapsed())
        ));
    }
}

/// File and path utilities
pub struct PathUtils;

impl PathUtils {
    /// Ensure directory exists, create if not
    pub fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::create_dir_all(path).map_err(|e| {
                CollectorError::Io(format!(
                    "Failed to create directory {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Ensure the parent directory of a file path exists
    pub fn ensure_parent_exists(path: &Path) -> Result<()> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Self::ensure_dir_exists(parent),
            _ => Ok(()),
        }
    }
}
