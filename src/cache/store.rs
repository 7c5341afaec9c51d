//! Cache Store Module
//!
//! One store: HashMap storage combined with FIFO insertion tracking and
//! lazy expiration. Both cache variants are built on this type.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};

// == Store ==
/// A bounded key/value mapping with lazy expiration and FIFO eviction.
///
/// Every operation takes the clock reading explicitly so callers decide
/// what "now" means; the cache variants pass the wall clock.
#[derive(Debug, Clone)]
pub struct Store<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// First-insertion order of live keys
    order: InsertionOrder,
    /// Counters
    stats: CacheStats,
}

impl<V> Default for Store<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Store<V> {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Inserts or overwrites `key` with an already normalized expiry.
    ///
    /// The store is first regulated against `size` so that it holds at most
    /// `size` entries once the write lands. Overwrites keep their FIFO slot.
    pub fn set_at(&mut self, key: String, value: V, expires_at: f64, size: usize) {
        self.regulate(size, &key);

        if !self.entries.contains_key(&key) {
            self.order.push(&key);
        }
        self.entries.insert(key, CacheEntry::new(value, expires_at));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Size Regulation ==
    /// Evicts oldest-inserted entries until there is room for `incoming`.
    ///
    /// A new key needs `len <= size - 1` before insertion, an overwrite
    /// needs `len <= size`. Victims are chosen by insertion order only.
    fn regulate(&mut self, size: usize, incoming: &str) {
        loop {
            // Recomputed each round: `incoming` itself may be the victim
            let target = if self.entries.contains_key(incoming) {
                size
            } else {
                size.saturating_sub(1)
            };
            if self.entries.len() <= target {
                break;
            }

            let Some(victim) = self.order.evict_oldest() else {
                break;
            };
            self.entries.remove(&victim);
            self.stats.record_eviction();
            debug!(key = %victim, size, "evicted oldest cache entry");
        }
    }

    // == Exists ==
    /// Returns true iff `key` is present and unexpired at `now`.
    ///
    /// A stale entry is dropped as an expiration, like `get_at` does.
    pub fn exists_at(&mut self, key: &str, now: f64) -> bool {
        let live = match self.entries.get(key) {
            Some(entry) => !entry.is_expired_at(now),
            None => return false,
        };

        if !live {
            self.drop_expired(key);
        }
        live
    }

    /// Same answer as `exists_at`, without dropping anything.
    pub fn is_live_at(&self, key: &str, now: f64) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired_at(now))
    }

    // == Delete ==
    /// Removes `key`. A missing key is a no-op.
    ///
    /// Returns true when a live entry was removed. A stale entry is dropped
    /// as an expiration and reported as false.
    pub fn delete_at(&mut self, key: &str, now: f64) -> bool {
        let live = match self.entries.get(key) {
            Some(entry) => !entry.is_expired_at(now),
            None => return false,
        };

        if live {
            self.remove_entry(key);
        } else {
            self.drop_expired(key);
        }
        live
    }

    // == Clear ==
    /// Drops every entry. Counters other than the entry count are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
    }

    // == Purge ==
    /// Removes every entry expired at `now`, returning how many were removed.
    pub fn purge_expired_at(&mut self, now: f64) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_entry(key);
        }
        self.stats.record_expirations(expired.len() as u64);
        expired.len()
    }

    /// Live keys at `now`, oldest insertion first.
    pub fn keys_at(&self, now: f64) -> Vec<String> {
        self.order
            .iter()
            .filter(|key| self.is_live_at(key, now))
            .cloned()
            .collect()
    }

    /// The entry for `key` regardless of expiry.
    pub fn peek(&self, key: &str) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    // == Length ==
    /// Number of entries physically held, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    fn drop_expired(&mut self, key: &str) {
        self.remove_entry(key);
        self.stats.record_expirations(1);
        debug!(key, "dropped expired cache entry");
    }

    fn remove_entry(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
    }
}

impl<V: Clone> Store<V> {
    // == Get ==
    /// Returns a clone of the value if `key` is present and unexpired.
    ///
    /// A stale entry is removed as a side effect and counted as a miss.
    pub fn get_at(&mut self, key: &str, now: f64) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                trace!(key, "cache hit");
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.drop_expired(key);
        }
        self.stats.record_miss();
        trace!(key, "cache miss");
        None
    }
}
