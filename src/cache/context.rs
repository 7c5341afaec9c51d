//! Context-Local Cache
//!
//! One independent store per execution context. A context is a worker
//! thread by default, or any explicitly numbered worker. Contexts never see
//! each other's entries.

use std::thread::{self, ThreadId};

use dashmap::DashMap;
use tracing::debug;

use crate::cache::normalize::{normalize_size_with, normalize_timeout_with, now_secs};
use crate::cache::{CacheEngine, CacheStats, Store, DEFAULT_SIZE, DEFAULT_TIMEOUT_SECS};
use crate::config::Config;

// == Context Id ==
/// Identifies the execution context that owns a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContextId {
    /// An OS thread
    Thread(ThreadId),
    /// A worker numbered by the application (task slot, pool index, ...)
    Worker(u64),
}

impl ContextId {
    /// The context of the calling thread.
    pub fn current() -> Self {
        ContextId::Thread(thread::current().id())
    }
}

// == Context Cache ==
/// Per-context stores behind one shareable object.
///
/// Wrap it in an `Arc` and hand it to every worker. Each worker then goes
/// through [`ContextCache::handle`] (or [`ContextCache::handle_for`]) and
/// only ever touches its own store, so no coordination between contexts
/// is needed beyond the map of stores itself.
#[derive(Debug)]
pub struct ContextCache<V> {
    stores: DashMap<ContextId, Store<V>>,
    default_timeout: f64,
    default_size: usize,
}

impl<V> Default for ContextCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> ContextCache<V> {
    // == Constructors ==
    pub fn new() -> Self {
        Self::with_defaults(DEFAULT_TIMEOUT_SECS, DEFAULT_SIZE)
    }

    pub fn with_defaults(default_timeout: f64, default_size: usize) -> Self {
        Self {
            stores: DashMap::new(),
            default_timeout,
            default_size,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::with_defaults(config.default_timeout, config.default_size)
    }

    // == Handles ==
    /// A view bound to the calling thread's store.
    pub fn handle(&self) -> ContextHandle<'_, V> {
        self.handle_for(ContextId::current())
    }

    /// A view bound to an explicit context's store.
    pub fn handle_for(&self, context: ContextId) -> ContextHandle<'_, V> {
        ContextHandle {
            cache: self,
            context,
        }
    }

    /// Drops a context's store entirely, e.g. when its worker exits.
    /// Returns false if the context had no store.
    pub fn release(&self, context: ContextId) -> bool {
        self.stores.remove(&context).is_some()
    }

    /// Number of contexts currently owning a store.
    pub fn contexts(&self) -> usize {
        self.stores.len()
    }

    /// Counters summed over every context.
    pub fn total_stats(&self) -> CacheStats {
        let mut total = CacheStats::new();
        for store in self.stores.iter() {
            total.merge(&store.stats());
        }
        total
    }

    /// Runs `f` on the context's store, creating an empty one first if the
    /// context has none yet.
    fn with_store<R>(&self, context: ContextId, f: impl FnOnce(&mut Store<V>) -> R) -> R {
        let mut store = self.stores.entry(context).or_insert_with(|| {
            debug!(?context, "created context-local cache store");
            Store::new()
        });
        f(store.value_mut())
    }

    /// Runs `f` on the context's store mutably, if it has one.
    fn update_store<R>(
        &self,
        context: ContextId,
        f: impl FnOnce(&mut Store<V>) -> R,
    ) -> Option<R> {
        self.stores
            .get_mut(&context)
            .map(|mut store| f(store.value_mut()))
    }

    /// Runs `f` on the context's store without creating it.
    fn read_store<R>(&self, context: ContextId, f: impl FnOnce(&Store<V>) -> R) -> Option<R> {
        self.stores.get(&context).map(|store| f(store.value()))
    }
}

// == Context Handle ==
/// A [`CacheEngine`] addressing exactly one context's store.
pub struct ContextHandle<'a, V> {
    cache: &'a ContextCache<V>,
    context: ContextId,
}

impl<V> Clone for ContextHandle<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for ContextHandle<'_, V> {}

impl<V> ContextHandle<'_, V> {
    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Live keys of this context, oldest insertion first.
    pub fn keys(&self) -> Vec<String> {
        let now = now_secs();
        self.cache
            .read_store(self.context, |store| store.keys_at(now))
            .unwrap_or_default()
    }

    /// Drops this context's expired entries. A context without a store has
    /// nothing to purge.
    pub fn purge_expired(&self) -> usize {
        let now = now_secs();
        self.cache
            .update_store(self.context, |store| store.purge_expired_at(now))
            .unwrap_or(0)
    }
}

impl<V: Clone> CacheEngine<V> for ContextHandle<'_, V> {
    fn get(&mut self, key: &str) -> Option<V> {
        let now = now_secs();
        self.cache.with_store(self.context, |store| store.get_at(key, now))
    }

    fn set(&mut self, key: &str, value: V, timeout: Option<f64>, size: Option<usize>) {
        let size = normalize_size_with(size, self.cache.default_size);
        let expires_at = normalize_timeout_with(timeout, self.cache.default_timeout, now_secs());
        self.cache.with_store(self.context, |store| {
            store.set_at(key.to_string(), value, expires_at, size)
        });
    }

    fn delete(&mut self, key: &str) {
        let now = now_secs();
        self.cache.with_store(self.context, |store| {
            store.delete_at(key, now);
        });
    }

    fn exists(&mut self, key: &str) -> bool {
        let now = now_secs();
        self.cache
            .update_store(self.context, |store| store.exists_at(key, now))
            .unwrap_or(false)
    }

    fn clear(&mut self) {
        self.cache.with_store(self.context, Store::clear);
    }

    fn len(&self) -> usize {
        self.cache.read_store(self.context, Store::len).unwrap_or(0)
    }

    fn stats(&self) -> CacheStats {
        self.cache
            .read_store(self.context, Store::stats)
            .unwrap_or_default()
    }
}
