//! Process-Wide Cache
//!
//! A single store owned by whoever constructed it. There is no hidden global:
//! the application creates one `MemoryCache` and passes it where needed.

use crate::cache::normalize::{normalize_size_with, normalize_timeout_with, now_secs};
use crate::cache::{CacheEngine, CacheStats, Store, DEFAULT_SIZE, DEFAULT_TIMEOUT_SECS};
use crate::config::Config;

// == Memory Cache ==
/// Caller-held cache with a single store.
///
/// All mutation goes through `&mut self`, so there is one owner at a time.
/// No synchronization is done here: to share it across threads or tasks,
/// wrap it (e.g. `Arc<tokio::sync::RwLock<MemoryCache<V>>>`). A `get`
/// followed by a `set` is never atomic.
#[derive(Debug, Clone)]
pub struct MemoryCache<V> {
    store: Store<V>,
    /// Timeout applied when a `set` passes none
    default_timeout: f64,
    /// Size applied when a `set` passes none
    default_size: usize,
}

impl<V> Default for MemoryCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> MemoryCache<V> {
    // == Constructors ==
    /// Creates an empty cache with the standard defaults (300 s, 300 entries).
    pub fn new() -> Self {
        Self::with_defaults(DEFAULT_TIMEOUT_SECS, DEFAULT_SIZE)
    }

    /// Creates an empty cache with custom fallback timeout and size.
    pub fn with_defaults(default_timeout: f64, default_size: usize) -> Self {
        Self {
            store: Store::new(),
            default_timeout,
            default_size,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_defaults(config.default_timeout, config.default_size)
    }

    // == Purge ==
    /// Removes all expired entries now instead of waiting for them to be
    /// touched. Returns the number removed.
    pub fn purge_expired(&mut self) -> usize {
        self.store.purge_expired_at(now_secs())
    }

    /// Live keys, oldest insertion first.
    pub fn keys(&self) -> Vec<String> {
        self.store.keys_at(now_secs())
    }

    /// Seconds left before a live key expires.
    pub fn ttl(&self, key: &str) -> Option<f64> {
        let now = now_secs();
        self.store
            .peek(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.ttl_remaining())
    }
}

impl<V: Clone> CacheEngine<V> for MemoryCache<V> {
    fn get(&mut self, key: &str) -> Option<V> {
        self.store.get_at(key, now_secs())
    }

    fn set(&mut self, key: &str, value: V, timeout: Option<f64>, size: Option<usize>) {
        let size = normalize_size_with(size, self.default_size);
        let expires_at = normalize_timeout_with(timeout, self.default_timeout, now_secs());
        self.store.set_at(key.to_string(), value, expires_at, size);
    }

    fn delete(&mut self, key: &str) {
        self.store.delete_at(key, now_secs());
    }

    fn exists(&mut self, key: &str) -> bool {
        self.store.exists_at(key, now_secs())
    }

    fn clear(&mut self) {
        self.store.clear();
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn stats(&self) -> CacheStats {
        self.store.stats()
    }
}
