//! Configuration Module
//!
//! Loads cache defaults from environment variables.

use std::env;

use crate::cache::normalize::{parse_size, parse_timeout};
use crate::cache::{DEFAULT_SIZE, DEFAULT_TIMEOUT_SECS};
use crate::error::{CacheError, Result};

/// Default interval between purge sweeps, in seconds.
pub const DEFAULT_PURGE_INTERVAL: u64 = 60;

/// Cache configuration parameters.
///
/// Unset variables fall back to defaults, malformed ones are errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Timeout in seconds applied when a `set` passes none
    pub default_timeout: f64,
    /// Maximum entries per store applied when a `set` passes none
    pub default_size: usize,
    /// Interval in seconds between background purge sweeps
    pub purge_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TIMEOUT` - Default timeout in seconds (default: 300)
    /// - `CACHE_DEFAULT_SIZE` - Default max entries per store (default: 300)
    /// - `CACHE_PURGE_INTERVAL` - Purge frequency in seconds (default: 60)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from any variable source.
    ///
    /// Zero and blank values count as unset, like they do for `set`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let default_timeout = match lookup("CACHE_DEFAULT_TIMEOUT") {
            Some(raw) => parse_timeout(&raw)?.unwrap_or(DEFAULT_TIMEOUT_SECS),
            None => DEFAULT_TIMEOUT_SECS,
        };

        let default_size = match lookup("CACHE_DEFAULT_SIZE") {
            Some(raw) => parse_size(&raw)?.unwrap_or(DEFAULT_SIZE),
            None => DEFAULT_SIZE,
        };

        let purge_interval = match lookup("CACHE_PURGE_INTERVAL") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    CacheError::Config(format!("CACHE_PURGE_INTERVAL is not a number: {raw}"))
                })?;
                if secs == 0 {
                    return Err(CacheError::Config(
                        "CACHE_PURGE_INTERVAL must be > 0".to_string(),
                    ));
                }
                secs
            }
            None => DEFAULT_PURGE_INTERVAL,
        };

        Ok(Self {
            default_timeout,
            default_size,
            purge_interval,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_timeout: DEFAULT_TIMEOUT_SECS,
            default_size: DEFAULT_SIZE,
            purge_interval: DEFAULT_PURGE_INTERVAL,
        }
    }
}
