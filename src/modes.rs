//! Eager and lazy invocation modes
//!
//! [`CachedFetch`] wires a base request descriptor to a [`FetchController`]
//! in one of two modes. Eager mode fetches on construction and again
//! whenever the base descriptor changes by value; lazy mode only fetches
//! through an explicit [`CachedFetch::trigger`] call, which can merge or
//! replace the base parameters and bypass the cache for that one call.

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::FetchConfig;
use crate::controller::FetchController;
use crate::request::{RequestDescriptor, RequestOverride};
use crate::transport::Transport;

/// Per-call options for a lazy trigger
#[derive(Debug, Clone, Copy)]
pub struct TriggerOptions {
    /// Shallow-merge the override onto the base (true) or use the override
    /// alone (false)
    pub merge_with_base: bool,
    /// Consult the cache for this call; false bypasses it once without
    /// disabling caching for later calls
    pub use_cache: bool,
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self {
            merge_with_base: true,
            use_cache: true,
        }
    }
}

/// A cached fetcher bound to a base request descriptor
///
/// Owns its controller, cache, and state cells; nothing is shared between
/// instances. Hosts read [`CachedFetch::data`] and [`CachedFetch::loading`]
/// directly or subscribe to their change streams.
pub struct CachedFetch<T, C> {
    controller: FetchController<T, C>,
    /// The caller's base parameters, updated by [`CachedFetch::set_base`]
    base: Mutex<RequestDescriptor>,
    /// The parameters of the most recent (or pending) invocation
    active: Mutex<RequestDescriptor>,
    lazy: bool,
}

impl<T, C> CachedFetch<T, C>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
    C: Transport,
{
    /// Creates a fetcher and, in eager mode, runs the first fetch
    ///
    /// In lazy mode nothing is fetched and `loading` stays false until the
    /// first trigger.
    pub async fn new(base: RequestDescriptor, transport: C, config: FetchConfig) -> Self {
        let lazy = config.lazy;
        let fetcher = Self {
            controller: FetchController::new(transport, config),
            base: Mutex::new(base.clone()),
            active: Mutex::new(base),
            lazy,
        };
        if !fetcher.lazy {
            let request = fetcher.active.lock().clone();
            fetcher.controller.run(&request, false).await;
        }
        fetcher
    }

    /// Replaces the base request descriptor
    ///
    /// Eager mode refetches only when the new descriptor differs from the
    /// active parameters by fingerprint; a new descriptor with identical
    /// field values is a no-op. Lazy mode just records the base for later
    /// triggers.
    pub async fn set_base(&self, base: RequestDescriptor) {
        let changed = {
            let mut guard = self.base.lock();
            *guard = base.clone();
            self.active.lock().fingerprint() != base.fingerprint()
        };

        if self.lazy {
            return;
        }
        if !changed {
            debug!(url = %base.url, "base parameters unchanged by value, skipping refetch");
            return;
        }

        *self.active.lock() = base.clone();
        self.controller.run(&base, false).await;
    }

    /// Explicitly invokes a fetch (lazy mode only)
    ///
    /// With no overrides the base descriptor is used as-is. Otherwise the
    /// override is shallow-merged onto the base or, with
    /// `merge_with_base = false`, used alone. `use_cache = false` bypasses
    /// the cache for this call only. Calling this on an eager fetcher is a
    /// logged no-op.
    pub async fn trigger(&self, overrides: Option<RequestOverride>, options: TriggerOptions) {
        if !self.lazy {
            warn!("trigger called on an eager fetcher, ignoring");
            return;
        }

        let request = {
            let base = self.base.lock().clone();
            match (overrides, options.merge_with_base) {
                (Some(overrides), true) => base.merged_with(&overrides),
                (Some(overrides), false) => overrides.into_descriptor(),
                (None, _) => base,
            }
        };

        *self.active.lock() = request.clone();
        self.controller.run(&request, !options.use_cache).await;
    }

    /// Returns the most recently published data, if any
    pub fn data(&self) -> Option<T> {
        self.controller.data()
    }

    /// Returns true while a transport call is in flight
    pub fn loading(&self) -> bool {
        self.controller.loading()
    }

    /// Subscribes to data changes
    pub fn subscribe_data(&self) -> watch::Receiver<Option<T>> {
        self.controller.subscribe_data()
    }

    /// Subscribes to loading-flag changes
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.controller.subscribe_loading()
    }

    /// Returns a snapshot of the parameters used by the last invocation
    pub fn active_params(&self) -> RequestDescriptor {
        self.active.lock().clone()
    }
}
