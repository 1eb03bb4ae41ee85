//! Integration tests for the binding lifecycle: broadcasts, re-resolves,
//! and the unmount guard

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::time::Duration;
use vitrine_content::{ContentType, JobPosting, Testimonial};
use vitrine_store::{ContentFetcher, FetchError, Resolver, StaticFetcher};
use vitrine_sync::{ChangeBus, MemoryStore, MutationLog, Namespace, Topic};
use vitrine_test_utils as fixtures;
use vitrine_view::Binding;

/// Fetcher that delays every answer, to hold a resolve in flight
struct SlowFetcher {
    inner: StaticFetcher,
    delay: Duration,
}

impl SlowFetcher {
    fn new(inner: StaticFetcher, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl ContentFetcher for SlowFetcher {
    async fn fetch_collection(&self, kind: ContentType) -> Result<Vec<Value>, FetchError> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_collection(kind).await
    }

    async fn fetch_config(&self, key: &str) -> Result<Option<Value>, FetchError> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_config(key).await
    }
}

#[tokio::test]
async fn broadcast_triggers_full_reresolve() {
    let fetcher = StaticFetcher::new();
    fetcher.insert_collection(ContentType::Job, vec![json!({"id": 1, "title": "One"})]);

    let bus = ChangeBus::new();
    let binding: Binding<JobPosting, _> =
        Binding::new(Resolver::new(fetcher.clone()), bus.clone());
    binding.mount().await.unwrap();
    assert_eq!(binding.snapshot().unwrap().records.len(), 1);

    // an admin write lands in the store, then something signals the change
    fetcher.insert_collection(
        ContentType::Job,
        vec![
            json!({"id": 1, "title": "One"}),
            json!({"id": 2, "title": "Two"}),
        ],
    );
    bus.publish(Topic::Content(ContentType::Job));

    tokio::time::sleep(Duration::from_millis(50)).await;
    let snapshot = binding.snapshot().unwrap();
    assert_eq!(snapshot.records.len(), 2);
    assert_eq!(snapshot.records[1].title, "Two");
}

#[tokio::test]
async fn unrelated_topics_do_not_wake_the_binding() {
    let resolver = Resolver::new(StaticFetcher::new());
    let bus = ChangeBus::new();
    let binding: Binding<Testimonial, _> = Binding::new(resolver, bus.clone());
    binding.mount().await.unwrap();
    let before = binding.snapshot().unwrap();

    bus.publish(Topic::Content(ContentType::Job));
    bus.publish(Topic::Local(Namespace::new("leads")));
    tokio::time::sleep(Duration::from_millis(30)).await;

    // same Arc: nothing re-resolved
    assert!(std::sync::Arc::ptr_eq(&before, &binding.snapshot().unwrap()));
}

#[tokio::test]
async fn in_flight_resolve_does_not_apply_after_unmount() {
    let fetcher = SlowFetcher::new(StaticFetcher::new(), Duration::from_millis(100));
    let resolver = Resolver::new(fetcher);
    let bus = ChangeBus::new();

    let binding: Binding<Testimonial, _> = Binding::new(resolver, bus.clone());
    binding.mount().await.unwrap();
    let mounted_snapshot = binding.snapshot().unwrap();

    // start a slow re-resolve, then unmount while it is in flight
    bus.publish(Topic::Content(ContentType::Testimonial));
    tokio::time::sleep(Duration::from_millis(20)).await;
    binding.unmount();

    // give the in-flight resolve ample time to finish (and be discarded)
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(std::sync::Arc::ptr_eq(
        &mounted_snapshot,
        &binding.snapshot().unwrap()
    ));
}

#[tokio::test]
async fn lead_capture_refreshes_a_watching_binding() {
    let bus = ChangeBus::new();
    let log = MutationLog::new(MemoryStore::new(), bus.clone());
    let leads = Namespace::new("leads");

    let resolver = Resolver::new(StaticFetcher::new());
    let binding: Binding<Testimonial, _> =
        Binding::new(resolver, bus.clone()).watch(Topic::Local(leads.clone()));
    binding.mount().await.unwrap();
    let before = binding.snapshot().unwrap();

    // a pricing modal captures a lead somewhere else in the app
    log.append(&leads, fixtures::lead("lead@example.com"));

    tokio::time::sleep(Duration::from_millis(50)).await;
    // the watching binding re-resolved (fresh snapshot allocation)
    assert!(!std::sync::Arc::ptr_eq(&before, &binding.snapshot().unwrap()));
}

#[tokio::test]
async fn pending_resolve_does_not_block_other_bindings() {
    let slow = SlowFetcher::new(StaticFetcher::new(), Duration::from_millis(150));
    let slow_resolver = Resolver::new(slow);
    let fast_resolver = Resolver::new(StaticFetcher::new());
    let bus = ChangeBus::new();

    let slow_binding: Binding<Testimonial, _> = Binding::new(slow_resolver, bus.clone());
    let fast_binding: Binding<Testimonial, _> = Binding::new(fast_resolver, bus.clone());

    let started = std::time::Instant::now();
    let (slow_result, fast_result) = tokio::join!(slow_binding.mount(), fast_binding.mount());
    slow_result.unwrap();
    fast_result.unwrap();

    // the fast binding did not wait for the slow one's fetch
    assert!(fast_binding.snapshot().is_some());
    assert!(started.elapsed() < Duration::from_millis(400));
}
