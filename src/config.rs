//! Configuration for the fetch controller

use std::fmt;
use std::sync::Arc;

use crate::error::FetchError;

/// Callback invoked when a fetch fails
///
/// When absent, failures are logged to the diagnostic stream instead.
pub type ErrorCallback = Arc<dyn Fn(&FetchError) + Send + Sync>;

/// Options recognized by the caching layer
#[derive(Clone)]
pub struct FetchConfig {
    /// Time-to-live for cache entries in seconds
    pub cache_ttl: u64,
    /// Whether fetches only happen via an explicit trigger
    pub lazy: bool,
    /// Optional callback invoked with each fetch failure
    pub error_callback: Option<ErrorCallback>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            cache_ttl: 120,
            lazy: false,
            error_callback: None,
        }
    }
}

impl FetchConfig {
    /// Creates a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cache TTL in seconds
    pub fn with_cache_ttl(mut self, seconds: u64) -> Self {
        self.cache_ttl = seconds;
        self
    }

    /// Switches to lazy invocation mode
    pub fn lazy(mut self) -> Self {
        self.lazy = true;
        self
    }

    /// Installs an error callback
    pub fn on_error(mut self, callback: impl Fn(&FetchError) + Send + Sync + 'static) -> Self {
        self.error_callback = Some(Arc::new(callback));
        self
    }
}

impl fmt::Debug for FetchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchConfig")
            .field("cache_ttl", &self.cache_ttl)
            .field("lazy", &self.lazy)
            .field("error_callback", &self.error_callback.is_some())
            .finish()
    }
}
