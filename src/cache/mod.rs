//! Cache Module
//!
//! In-process caching with lazy TTL expiration and FIFO eviction, in two
//! scopes: a caller-held process-wide cache and per-context caches.

mod context;
mod entry;
mod memory;
pub mod normalize;
mod order;
mod stats;
mod store;


// Re-export public types
pub use context::{ContextCache, ContextHandle, ContextId};
pub use entry::CacheEntry;
pub use memory::MemoryCache;
pub use normalize::{DEFAULT_SIZE, DEFAULT_TIMEOUT_SECS};
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::Store;

// == Cache Engine ==
/// The operations every cache variant supports, whatever its storage scope.
///
/// None of these fail. Missing keys, absent timeouts and absent sizes are
/// ordinary inputs resolved through defaults.
pub trait CacheEngine<V> {
    /// Returns the value if present and unexpired. A stale entry found on
    /// the way is removed.
    fn get(&mut self, key: &str) -> Option<V>;

    /// Inserts or overwrites `key`.
    ///
    /// `timeout` is seconds from now; `size` is the maximum number of
    /// entries in the store. `None` or zero selects the defaults.
    fn set(&mut self, key: &str, value: V, timeout: Option<f64>, size: Option<usize>);

    /// Removes `key` if present and unexpired, otherwise does nothing.
    fn delete(&mut self, key: &str);

    /// True iff `key` is present and unexpired. A stale entry found on
    /// the way is removed.
    fn exists(&mut self, key: &str) -> bool;

    /// Empties the store.
    fn clear(&mut self);

    /// Number of entries physically held, stale ones included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> CacheStats;
}
