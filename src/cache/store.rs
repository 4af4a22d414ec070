//! In-memory store for cached responses with TTL expiry

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::fingerprint::Fingerprint;

/// A cached value together with its absolute expiry timestamp
///
/// Entries are never mutated in place; a re-fetch under the same fingerprint
/// replaces the entry wholesale.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub value: T,
    /// When the entry stops being served as a hit
    pub expires_at: DateTime<Utc>,
}

/// Maps request fingerprints to cached entries
///
/// The store is owned by a single controller instance and holds at most one
/// entry per fingerprint. Presence alone never counts as a hit: freshness
/// checks go through [`CacheStore::is_fresh`], so an expired entry that the
/// sweep has not removed yet is still a miss.
#[derive(Debug, Default)]
pub struct CacheStore<T> {
    entries: HashMap<Fingerprint, CacheEntry<T>>,
}

impl<T> CacheStore<T> {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the entry for a key, fresh or not
    pub fn get(&self, key: &Fingerprint) -> Option<&CacheEntry<T>> {
        self.entries.get(key)
    }

    /// Stores a value under a key, replacing any previous entry
    ///
    /// The expiry is `now + ttl_seconds`, with the wall clock read at call
    /// time so TTL arithmetic stays consistent under slow transports. TTLs
    /// too large for the timestamp range saturate to the maximum
    /// representable instant, which never expires in practice.
    pub fn put(&mut self, key: Fingerprint, value: T, ttl_seconds: u64) {
        let expires_at = Duration::try_seconds(ttl_seconds.min(i64::MAX as u64) as i64)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.entries.insert(key, CacheEntry { value, expires_at });
    }

    /// Returns true iff an entry exists and its expiry is still ahead of `now`
    pub fn is_fresh(&self, key: &Fingerprint, now: DateTime<Utc>) -> bool {
        self.entries
            .get(key)
            .is_some_and(|entry| entry.expires_at > now)
    }

    /// Removes every entry whose expiry has passed `now`
    pub fn sweep_expired(&mut self, now: DateTime<Utc>) {
        self.entries.retain(|_, entry| entry.expires_at >= now);
    }

    /// Returns the number of stored entries, expired ones included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
