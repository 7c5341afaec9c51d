//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with absolute expiry.

use crate::cache::normalize::now_secs;

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
///
/// Timestamps are seconds since the Unix epoch, kept as `f64` so that
/// fractional timeouts survive normalization.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Creation timestamp (Unix seconds)
    pub created_at: f64,
    /// Expiration timestamp (Unix seconds)
    pub expires_at: f64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry that expires at the given absolute timestamp.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `expires_at` - Absolute expiry, as produced by `normalize_timeout`
    pub fn new(value: V, expires_at: f64) -> Self {
        Self {
            value,
            created_at: now_secs(),
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks expiry against an explicit clock reading.
    ///
    /// Boundary condition: an entry is expired once `expires_at <= now`.
    /// Written as a negated `>` so that a NaN expiry never reads as live.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn is_expired_at(&self, now: f64) -> bool {
        !(self.expires_at > now)
    }

    // == Time To Live ==
    /// Returns the remaining lifetime in seconds, `0.0` once expired.
    pub fn ttl_remaining(&self) -> f64 {
        let remaining = self.expires_at - now_secs();
        if remaining > 0.0 {
            remaining
        } else {
            0.0
        }
    }
}
