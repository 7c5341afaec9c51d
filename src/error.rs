//! Error types for the cache engine
//!
//! Cache operations themselves never fail. Errors only surface where untyped
//! input (environment variables, config text) is converted into timeouts and
//! sizes.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// Text that cannot be converted into a number of seconds
    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),

    /// Text that cannot be converted into an entry count
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    /// Configuration value rejected
    #[error("Invalid configuration: {0}")]
    Config(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
