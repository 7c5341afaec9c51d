//! Local Cache - An in-process key/value cache
//!
//! Lazy TTL expiration and FIFO eviction, either in one caller-held store
//! or in one store per execution context.

pub mod cache;
pub mod config;
pub mod error;
pub mod memoize;
pub mod tasks;

pub use cache::{CacheEngine, ContextCache, ContextId, MemoryCache};
pub use config::Config;
pub use error::{CacheError, Result};
pub use memoize::{CacheKey, CachedFn};
pub use tasks::spawn_purge_task;
