//! End-to-end scenarios for the cached fetcher
//!
//! Exercises the public surface the way a host would: construct a fetcher,
//! let parameters change, trigger lazy fetches, and observe data/loading
//! through the published cells.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use memofetch::{
    CachedFetch, FetchConfig, FetchError, RawResponse, RequestDescriptor, Transport,
    TriggerOptions,
};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Listing {
    items: Vec<String>,
}

/// Transport serving a counter-stamped body so each network round trip is
/// distinguishable in the decoded data
struct CountingTransport {
    calls: Arc<AtomicUsize>,
}

impl CountingTransport {
    fn new() -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (Self { calls: calls.clone() }, calls)
    }
}

#[async_trait]
impl Transport for CountingTransport {
    async fn send(&self, _request: &RequestDescriptor) -> Result<RawResponse, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(RawResponse {
            status: 200,
            body: format!(r#"{{"items":["response-{call}"]}}"#),
        })
    }
}

#[tokio::test]
async fn eager_lifecycle_fetches_once_and_ignores_identical_rerenders() {
    let (transport, calls) = CountingTransport::new();
    let fetcher: CachedFetch<Listing, _> = CachedFetch::new(
        RequestDescriptor::get("/items"),
        transport,
        FetchConfig::new().with_cache_ttl(1),
    )
    .await;

    // Mount: exactly one transport call, data published, loading settled.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        fetcher.data(),
        Some(Listing {
            items: vec!["response-1".to_string()]
        })
    );
    assert!(!fetcher.loading());

    // Re-render with an identical base descriptor (new object, same
    // fields): no second transport call.
    fetcher.set_base(RequestDescriptor::get("/items")).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // A genuine parameter change does refetch.
    fetcher
        .set_base(RequestDescriptor::get("/items").with_query("page", "2"))
        .await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        fetcher.data(),
        Some(Listing {
            items: vec!["response-2".to_string()]
        })
    );
}

#[tokio::test]
async fn lazy_lifecycle_hits_cache_until_ttl_elapses() {
    let (transport, calls) = CountingTransport::new();
    let fetcher: CachedFetch<Listing, _> = CachedFetch::new(
        RequestDescriptor::get("/items"),
        transport,
        FetchConfig::new().with_cache_ttl(1).lazy(),
    )
    .await;

    // Nothing happens until the first trigger.
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(fetcher.data().is_none());
    assert!(!fetcher.loading());

    fetcher.trigger(None, TriggerOptions::default()).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        fetcher.data(),
        Some(Listing {
            items: vec!["response-1".to_string()]
        })
    );

    // Within the TTL an identical trigger is served from the cache.
    fetcher.trigger(None, TriggerOptions::default()).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Past the TTL the entry is stale and the transport is called again.
    tokio::time::sleep(Duration::from_millis(1200)).await;
    fetcher.trigger(None, TriggerOptions::default()).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(
        fetcher.data(),
        Some(Listing {
            items: vec!["response-2".to_string()]
        })
    );
}

#[tokio::test]
async fn lazy_trigger_with_overrides_fetches_merged_params() {
    let (transport, calls) = CountingTransport::new();
    let fetcher: CachedFetch<Listing, _> = CachedFetch::new(
        RequestDescriptor::get("/items").with_query("q", "a"),
        transport,
        FetchConfig::new().lazy(),
    )
    .await;

    fetcher.trigger(None, TriggerOptions::default()).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // A merged override changes the fingerprint, so this is a fresh fetch,
    // not a cache hit.
    fetcher
        .trigger(
            Some(memofetch::RequestOverride::new().query("q", "b")),
            TriggerOptions::default(),
        )
        .await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(fetcher.active_params().query.get("q"), Some(&"b".to_string()));
    assert_eq!(fetcher.active_params().url, "/items");

    // Triggering the earlier parameters again is still a cache hit.
    fetcher.trigger(None, TriggerOptions::default()).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn data_subscription_sees_published_values() {
    let (transport, _calls) = CountingTransport::new();
    let fetcher: CachedFetch<Listing, _> = CachedFetch::new(
        RequestDescriptor::get("/items"),
        transport,
        FetchConfig::new().lazy(),
    )
    .await;
    let mut data = fetcher.subscribe_data();

    assert!(data.borrow_and_update().is_none());

    fetcher.trigger(None, TriggerOptions::default()).await;

    assert!(data.has_changed().expect("sender alive"));
    assert_eq!(
        data.borrow_and_update().clone(),
        Some(Listing {
            items: vec!["response-1".to_string()]
        })
    );
}
