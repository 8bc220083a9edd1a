//! Configuration management for zipcrack
//!
//! Settings are layered with figment (see [`core`]) and extracted into the
//! typed [`ZipcrackConfig`]. Every field has a default so a partial file only
//! needs to name what it changes.

pub mod core;
pub mod smart_load;

use crate::search::{Charset, DEFAULT_SYMBOLS, SearchOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ZipcrackConfig {
    pub search: SearchConfig,
    pub logging: LoggingConfig,
    pub state: StateConfig,
}

/// Brute-force search settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Longest candidate tried
    pub max_length: i64,

    /// Index of the target entry in the archive
    pub entry_index: usize,

    /// Candidate alphabet, in enumeration order
    pub charset: String,

    /// Maximum concurrent workers (0 = hardware parallelism)
    pub max_threads: usize,

    /// Cache one archive handle per worker thread
    pub reuse_handle: bool,
}

/// Rotating log file settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub directory: PathBuf,
    pub file_name: String,

    /// Size in bytes at which the active file is rotated
    pub max_file_size: u64,

    /// Number of rotated generations kept
    pub max_backups: usize,
}

/// Small pieces of state remembered between runs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StateConfig {
    pub last_dir_file: PathBuf,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_length: 4,
            entry_index: 0,
            charset: DEFAULT_SYMBOLS.to_string(),
            max_threads: 0,
            reuse_handle: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            directory: PathBuf::from("logs"),
            file_name: "app.log".to_string(),
            max_file_size: 1024 * 1024,
            max_backups: 5,
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            last_dir_file: PathBuf::from("dir"),
        }
    }
}

impl ZipcrackConfig {
    /// Validate values that serde alone cannot check
    pub fn validate(&self) -> Result<()> {
        if self.search.max_length < 1 {
            anyhow::bail!(
                "search.max_length must be at least 1 (got {})",
                self.search.max_length
            );
        }
        Charset::new(&self.search.charset).context("Invalid search.charset")?;

        if self.logging.enabled {
            if self.logging.file_name.is_empty() {
                anyhow::bail!("logging.file_name cannot be empty");
            }
            if self.logging.max_file_size == 0 {
                anyhow::bail!("logging.max_file_size cannot be 0");
            }
        }

        Ok(())
    }

    /// Build the search options described by this configuration
    pub fn search_options(&self) -> Result<SearchOptions> {
        let charset = Charset::new(&self.search.charset).context("Invalid search.charset")?;
        Ok(SearchOptions {
            charset,
            max_threads: self.search.max_threads,
            reuse_handle: self.search.reuse_handle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ZipcrackConfig::default();
        assert!(config.validate().is_ok());

        let options = config.search_options().unwrap();
        assert_eq!(options.charset, Charset::default());
        assert!(options.reuse_handle);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ZipcrackConfig::default();
        config.search.max_length = 0;
        assert!(config.validate().is_err());

        let mut config = ZipcrackConfig::default();
        config.search.charset = "aa".to_string();
        let err = config.validate().unwrap_err();
        assert!(format!("{err:#}").contains("duplicate"));

        let mut config = ZipcrackConfig::default();
        config.logging.max_file_size = 0;
        assert!(config.validate().is_err());
        config.logging.enabled = false;
        assert!(config.validate().is_ok());
    }
}
