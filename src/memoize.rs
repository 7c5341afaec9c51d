//! Function Result Caching
//!
//! Wraps a function so its result lands in a cache under a fixed or derived
//! key. The cache is passed in on every call; the wrapper owns no storage.

use std::fmt;
use std::marker::PhantomData;

use tracing::debug;

use crate::cache::CacheEngine;

// == Cache Key ==
/// How a [`CachedFn`] names the entry it writes.
pub enum CacheKey<A> {
    /// Always the same key, whatever the arguments
    Fixed(String),
    /// A key computed from the arguments
    Derived(Box<dyn Fn(&A) -> String + Send + Sync>),
}

impl<A> CacheKey<A> {
    pub fn resolve(&self, args: &A) -> String {
        match self {
            CacheKey::Fixed(key) => key.clone(),
            CacheKey::Derived(derive) => derive(args),
        }
    }
}

impl<A> fmt::Debug for CacheKey<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Fixed(key) => f.debug_tuple("Fixed").field(key).finish(),
            CacheKey::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

// == Cached Function ==
/// A function whose every result is written to a cache.
///
/// # Example
/// ```
/// use local_cache::cache::{CacheEngine, MemoryCache};
/// use local_cache::memoize::CachedFn;
///
/// let mut cache = MemoryCache::new();
/// let square = CachedFn::with_key_fn(|n: &u32| format!("square:{n}"), |n: &u32| n * n)
///     .timeout(60.0);
///
/// assert_eq!(square.call(&mut cache, &4), 16);
/// assert_eq!(cache.get("square:4"), Some(16));
/// ```
pub struct CachedFn<A, V, F> {
    function: F,
    key: CacheKey<A>,
    timeout: Option<f64>,
    size: Option<usize>,
    _marker: PhantomData<fn(&A) -> V>,
}

impl<A, V, F> CachedFn<A, V, F>
where
    V: Clone,
    F: Fn(&A) -> V,
{
    /// Caches every result under the same `key`.
    pub fn new(key: impl Into<String>, function: F) -> Self {
        Self::with_key(CacheKey::Fixed(key.into()), function)
    }

    /// Caches each result under a key derived from its arguments.
    pub fn with_key_fn(
        key_fn: impl Fn(&A) -> String + Send + Sync + 'static,
        function: F,
    ) -> Self {
        Self::with_key(CacheKey::Derived(Box::new(key_fn)), function)
    }

    pub fn with_key(key: CacheKey<A>, function: F) -> Self {
        Self {
            function,
            key,
            timeout: None,
            size: None,
            _marker: PhantomData,
        }
    }

    /// Timeout in seconds for written entries. Unset uses the cache default.
    pub fn timeout(mut self, secs: f64) -> Self {
        self.timeout = Some(secs);
        self
    }

    /// Store size passed along with every write. Unset uses the cache default.
    pub fn size(mut self, max_entries: usize) -> Self {
        self.size = Some(max_entries);
        self
    }

    pub fn key(&self) -> &CacheKey<A> {
        &self.key
    }

    // == Call ==
    /// Runs the function, stores the result, and returns it.
    ///
    /// The function always runs; any cached value is overwritten.
    pub fn call<C>(&self, cache: &mut C, args: &A) -> V
    where
        C: CacheEngine<V> + ?Sized,
    {
        let value = (self.function)(args);
        let key = self.key.resolve(args);
        debug!(key = %key, "caching function result");
        cache.set(&key, value.clone(), self.timeout, self.size);
        value
    }

    /// Returns the live cached value for these arguments, or falls back to
    /// [`CachedFn::call`].
    pub fn call_or_cached<C>(&self, cache: &mut C, args: &A) -> V
    where
        C: CacheEngine<V> + ?Sized,
    {
        let key = self.key.resolve(args);
        match cache.get(&key) {
            Some(value) => value,
            None => self.call(cache, args),
        }
    }
}

impl<A, V, F> fmt::Debug for CachedFn<A, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedFn")
            .field("key", &self.key)
            .field("timeout", &self.timeout)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
