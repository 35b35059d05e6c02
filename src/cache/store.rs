//! Cache Store Module
//!
//! Expiring key-value cache with lazy eviction on read and an explicit sweep.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;

use crate::cache::{CacheEntry, Clock, SystemClock, DEFAULT_TTL};

// == Expiring Cache ==
/// In-memory cache where every entry carries an absolute expiry.
///
/// All operations take `&self` and complete without suspending; the map is
/// sharded so single-key operations are atomic with respect to each other.
/// Expired entries are removed when they are next read, or by [`cleanup`].
///
/// [`cleanup`]: ExpiringCache::cleanup
pub struct ExpiringCache<V> {
    /// Key-value storage
    entries: DashMap<String, CacheEntry<V>>,
    /// TTL applied when `set` gets no override
    default_ttl: Duration,
    /// Time source for expiry checks
    clock: Arc<dyn Clock>,
}

impl<V: Clone> ExpiringCache<V> {
    // == Constructor ==
    /// Creates a cache with the given default TTL, driven by the system clock.
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, Arc::new(SystemClock))
    }

    /// Creates a cache driven by a caller-supplied clock.
    pub fn with_clock(default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            default_ttl,
            clock,
        }
    }

    // == Set ==
    /// Stores a value under `key`, replacing any existing entry.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (uses the default TTL if None)
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let entry = CacheEntry::new(value, ttl, self.clock.now_ms());
        self.entries.insert(key.into(), entry);
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// An expired entry is removed as a side effect and reported as absent.
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };

        if expired {
            // Conditional so a fresh entry written in between survives
            self.entries
                .remove_if(key, |_, entry| entry.is_expired_at(now));
        }

        None
    }

    // == Contains ==
    /// Returns true if `key` holds a live entry. Evicts like [`get`](Self::get).
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    // == Delete ==
    /// Removes an entry regardless of expiry.
    ///
    /// Returns whether an entry was present. Deleting a missing key is a no-op.
    pub fn delete(&self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Clear ==
    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    // == Length ==
    /// Returns the number of stored entries.
    ///
    /// Expired entries that have not been read or swept yet are still
    /// counted; call [`cleanup`](Self::cleanup) first for an exact figure.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if nothing is stored, expired entries included.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup(&self) -> usize {
        let now = self.clock.now_ms();
        let mut removed = 0;

        self.entries.retain(|_, entry| {
            let keep = !entry.is_expired_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });

        removed
    }

    /// Returns the TTL applied when `set` gets no override.
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }
}

impl<V: Clone> Default for ExpiringCache<V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<V> fmt::Debug for ExpiringCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringCache")
            .field("entries", &self.entries.len())
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}
