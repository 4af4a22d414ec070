//! Memofetch - client-side request caching
//!
//! A caching layer that de-duplicates and memoizes network requests keyed by
//! their full parameter set. Responses are cached under a canonical request
//! fingerprint with a per-entry TTL, and fetches run in either eager mode
//! (automatic, on construction and on parameter change) or lazy mode
//! (explicit trigger with merge and cache-bypass controls). Results are
//! published to observable `data` / `loading` cells that hosts can poll or
//! subscribe to.
//!
//! # Example
//!
//! ```no_run
//! use memofetch::{CachedFetch, FetchConfig, HttpTransport, RequestDescriptor};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Clone, Deserialize)]
//! struct Item {
//!     name: String,
//! }
//!
//! # async fn example() {
//! let fetcher: CachedFetch<Vec<Item>, _> = CachedFetch::new(
//!     RequestDescriptor::get("https://api.example.com/items"),
//!     HttpTransport::new(),
//!     FetchConfig::new().with_cache_ttl(60),
//! )
//! .await;
//!
//! if let Some(items) = fetcher.data() {
//!     println!("{} items", items.len());
//! }
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod fingerprint;
pub mod modes;
pub mod request;
pub mod transport;

pub use cache::{CacheEntry, CacheStore};
pub use config::{ErrorCallback, FetchConfig};
pub use controller::FetchController;
pub use error::FetchError;
pub use fingerprint::Fingerprint;
pub use modes::{CachedFetch, TriggerOptions};
pub use request::{Method, RequestDescriptor, RequestOverride};
pub use transport::{decode, HttpTransport, RawResponse, Transport};
