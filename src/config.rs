//! Configuration for pagestore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, StoreError};
use crate::pager::PAGE_SIZE;
use crate::table::TABLE_MAX_PAGES;

/// Configuration for a single table file
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing file for the table. Created on open if missing.
    pub path: PathBuf,

    /// Upper bound on page indices; table capacity is
    /// `ROWS_PER_PAGE * max_pages`.
    pub max_pages: usize,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// fsync the backing file after the final flush on close
    pub sync_on_close: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./pagestore.db"),
            max_pages: TABLE_MAX_PAGES,
            sync_on_close: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Config for `path` with every other setting at its default
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the maximum number of pages
    pub fn max_pages(mut self, pages: usize) -> Self {
        self.config.max_pages = pages;
        self
    }

    /// Set whether close() fsyncs the file
    pub fn sync_on_close(mut self, sync: bool) -> Self {
        self.config.sync_on_close = sync;
        self
    }

    pub fn build(self) -> Result<Config> {
        check_max_pages(self.config.max_pages)?;
        Ok(self.config)
    }
}

/// A page limit must be non-zero and its byte span must fit in the index
/// and offset types.
pub(crate) fn check_max_pages(max_pages: usize) -> Result<()> {
    if max_pages == 0 {
        return Err(StoreError::Config(
            "max_pages must be at least 1".to_string(),
        ));
    }
    let span = max_pages
        .checked_mul(PAGE_SIZE)
        .filter(|&bytes| u64::try_from(bytes).is_ok());
    if span.is_none() {
        return Err(StoreError::Config(format!(
            "max_pages {} is too large",
            max_pages
        )));
    }
    Ok(())
}
