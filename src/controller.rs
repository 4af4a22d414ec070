//! Fetch controller orchestrating the request lifecycle
//!
//! The controller owns the cache store and the observable state cells, and
//! drives one request lifecycle at a time: consult the cache, call the
//! transport on a miss or bypass, publish the result, sweep expired entries.
//! Hosts observe `data` and `loading` through watch channels and re-render
//! on each write.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, error};

use crate::cache::CacheStore;
use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::fingerprint::Fingerprint;
use crate::request::RequestDescriptor;
use crate::transport::{decode, Transport};

/// Drives cached fetches for a single owner
///
/// Lifecycle per [`FetchController::run`] call: idle, optionally loading
/// while the transport call is in flight, then idle again. There is no
/// terminal failure state; a failed run leaves the previous data visible
/// and the controller ready for the next trigger.
///
/// Overlapping runs are suppressed: while one run is in flight, further
/// `run` calls on the same controller return immediately without touching
/// the transport or the cache. This drops concurrent calls silently in
/// exchange for at most one in-flight request per controller; callers that
/// need concurrent fetches for distinct keys should use one controller per
/// key.
pub struct FetchController<T, C> {
    transport: C,
    config: FetchConfig,
    cache: Mutex<CacheStore<T>>,
    /// Guards the whole run, cache-hit path included, so a freshness check
    /// never interleaves with a concurrent cache write from this instance.
    in_flight: AtomicBool,
    data_tx: watch::Sender<Option<T>>,
    loading_tx: watch::Sender<bool>,
}

impl<T, C> FetchController<T, C>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    C: Transport,
{
    /// Creates an idle controller with an empty cache
    ///
    /// `loading` starts false regardless of mode; it only flips while a
    /// transport call is in flight.
    pub fn new(transport: C, config: FetchConfig) -> Self {
        let (data_tx, _) = watch::channel(None);
        let (loading_tx, _) = watch::channel(false);
        Self {
            transport,
            config,
            cache: Mutex::new(CacheStore::new()),
            in_flight: AtomicBool::new(false),
            data_tx,
            loading_tx,
        }
    }

    /// Returns the most recently published data, if any
    pub fn data(&self) -> Option<T> {
        self.data_tx.borrow().clone()
    }

    /// Returns true while a transport call is in flight
    pub fn loading(&self) -> bool {
        *self.loading_tx.borrow()
    }

    /// Subscribes to data changes
    pub fn subscribe_data(&self) -> watch::Receiver<Option<T>> {
        self.data_tx.subscribe()
    }

    /// Subscribes to loading-flag changes
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading_tx.subscribe()
    }

    /// Runs one fetch lifecycle for the given request
    ///
    /// A fresh cache entry is served synchronously without flipping the
    /// loading flag. On a miss (or with `bypass_cache`) the transport is
    /// awaited; success publishes the decoded value and stores it with a
    /// fresh expiry, failure goes to the error callback or the log and
    /// leaves the previous data untouched. Expired entries are swept on
    /// every completion.
    pub async fn run(&self, request: &RequestDescriptor, bypass_cache: bool) {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!(url = %request.url, "fetch already in flight, suppressing");
            return;
        }

        let key = request.fingerprint();

        if !bypass_cache {
            if let Some(value) = self.fresh_cached_value(&key) {
                debug!(url = %request.url, "serving fresh cache entry");
                self.data_tx.send_replace(Some(value));
                self.cache.lock().sweep_expired(Utc::now());
                self.in_flight.store(false, Ordering::SeqCst);
                return;
            }
        }

        self.loading_tx.send_replace(true);

        match self.fetch(request).await {
            Ok(value) => {
                self.data_tx.send_replace(Some(value.clone()));
                self.cache.lock().put(key, value, self.config.cache_ttl);
            }
            Err(err) => match &self.config.error_callback {
                Some(callback) => callback(&err),
                None => error!(url = %request.url, "request failed: {err}"),
            },
        }

        self.cache.lock().sweep_expired(Utc::now());
        self.loading_tx.send_replace(false);
        self.in_flight.store(false, Ordering::SeqCst);
    }

    /// Returns the cached value for a key iff the entry is still fresh
    fn fresh_cached_value(&self, key: &Fingerprint) -> Option<T> {
        let cache = self.cache.lock();
        if cache.is_fresh(key, Utc::now()) {
            cache.get(key).map(|entry| entry.value.clone())
        } else {
            None
        }
    }

    async fn fetch(&self, request: &RequestDescriptor) -> Result<T, FetchError> {
        let raw = self.transport.send(request).await?;
        decode(&raw)
    }

    /// Returns the number of cache entries, expired ones included
    #[cfg(test)]
    fn cache_len(&self) -> usize {
        self.cache.lock().len()
    }
}
