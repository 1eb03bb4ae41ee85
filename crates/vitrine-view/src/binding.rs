//! Binding lifecycle over the resolver and change bus
//!
//! A binding owns one page's view of one collection (or one config blob).
//! The contract:
//! 1. `mount` resolves once and stores the snapshot
//! 2. a broadcast on a watched topic triggers a full re-resolve
//! 3. `unmount` (or drop) stops the listener; a resolve still in flight at
//!    that moment must not apply its result afterwards

use crate::error::BindingError;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use vitrine_content::ContentRecord;
use vitrine_store::{
    CategoryFilter, ConfigSnapshot, ContentFetcher, Resolver, Snapshot,
};
use vitrine_sync::{ChangeBus, Namespace, Topic};

/// State shared between a binding and its listener task
#[derive(Debug)]
struct Shared<T> {
    mounted: AtomicBool,
    slot: Mutex<Option<Arc<T>>>,
}

impl<T> Shared<T> {
    fn new() -> Self {
        Self {
            mounted: AtomicBool::new(false),
            slot: Mutex::new(None),
        }
    }

    fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    /// Store a snapshot, but only while mounted
    fn publish(&self, value: T) {
        if self.is_mounted() {
            *self.slot.lock() = Some(Arc::new(value));
        }
    }
}

/// A page's live view of one collection
///
/// Not `Clone` on purpose: one binding per mounted component, mirroring the
/// one-subscription-per-mount contract.
#[derive(Debug)]
pub struct Binding<R: ContentRecord, F: ContentFetcher> {
    resolver: Resolver<F>,
    bus: ChangeBus,
    filter: Option<CategoryFilter>,
    extra_topics: Vec<Topic>,
    shared: Arc<Shared<Snapshot<R>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<R: ContentRecord, F: ContentFetcher> Binding<R, F> {
    /// Create an unmounted binding
    #[must_use]
    pub fn new(resolver: Resolver<F>, bus: ChangeBus) -> Self {
        Self {
            resolver,
            bus,
            filter: None,
            extra_topics: Vec::new(),
            shared: Arc::new(Shared::new()),
            task: Mutex::new(None),
        }
    }

    /// Restrict the binding to one category
    #[must_use]
    pub fn with_filter(mut self, filter: CategoryFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Also re-resolve when this topic fires
    ///
    /// Pages watching locally captured records (a pricing page refreshing its
    /// lead count) add the namespace topic here.
    #[must_use]
    pub fn watch(mut self, topic: Topic) -> Self {
        self.extra_topics.push(topic);
        self
    }

    /// Current snapshot, if one has been resolved since mount
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<Snapshot<R>>> {
        self.shared.slot.lock().clone()
    }

    /// Whether the binding is currently mounted
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.shared.is_mounted()
    }

    /// Mount: resolve once, then listen for broadcasts
    ///
    /// # Errors
    /// [`BindingError::AlreadyMounted`] when called twice without an
    /// intervening [`unmount`](Self::unmount).
    pub async fn mount(&self) -> Result<(), BindingError> {
        if self.shared.mounted.swap(true, Ordering::AcqRel) {
            return Err(BindingError::AlreadyMounted);
        }

        let snapshot = resolve_once(&self.resolver, self.filter.as_ref()).await;
        self.shared.publish(snapshot);

        let mut topics = vec![Topic::Content(R::KIND)];
        topics.extend(self.extra_topics.iter().cloned());
        let mut subscription = self.bus.subscribe_many(topics);

        let shared = Arc::clone(&self.shared);
        let resolver = self.resolver.clone();
        let filter = self.filter.clone();
        let handle = tokio::spawn(async move {
            while subscription.changed().await.is_ok() {
                if !shared.is_mounted() {
                    break;
                }
                let snapshot = resolve_once(&resolver, filter.as_ref()).await;
                if !shared.is_mounted() {
                    // unmounted while the resolve was in flight; discard
                    tracing::debug!(kind = %R::KIND, "discarding resolve for unmounted binding");
                    break;
                }
                shared.publish(snapshot);
            }
        });
        *self.task.lock() = Some(handle);

        tracing::debug!(kind = %R::KIND, "binding mounted");
        Ok(())
    }

    /// Unmount: stop listening and refuse any in-flight resolve result
    ///
    /// The last snapshot stays readable; a remount replaces it.
    pub fn unmount(&self) {
        self.shared.mounted.store(false, Ordering::Release);
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
        tracing::debug!(kind = %R::KIND, "binding unmounted");
    }
}

impl<R: ContentRecord, F: ContentFetcher> Drop for Binding<R, F> {
    fn drop(&mut self) {
        self.shared.mounted.store(false, Ordering::Release);
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
    }
}

async fn resolve_once<R: ContentRecord, F: ContentFetcher>(
    resolver: &Resolver<F>,
    filter: Option<&CategoryFilter>,
) -> Snapshot<R> {
    match filter {
        Some(filter) => resolver.resolve_filtered(filter).await,
        None => resolver.resolve().await,
    }
}

/// A page's live view of one config blob
#[derive(Debug)]
pub struct ConfigBinding<F: ContentFetcher> {
    resolver: Resolver<F>,
    bus: ChangeBus,
    key: String,
    shared: Arc<Shared<ConfigSnapshot>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<F: ContentFetcher> ConfigBinding<F> {
    /// Create an unmounted config binding for one key
    #[must_use]
    pub fn new(resolver: Resolver<F>, bus: ChangeBus, key: impl Into<String>) -> Self {
        Self {
            resolver,
            bus,
            key: key.into(),
            shared: Arc::new(Shared::new()),
            task: Mutex::new(None),
        }
    }

    /// Current snapshot, if one has been resolved since mount
    #[must_use]
    pub fn snapshot(&self) -> Option<Arc<ConfigSnapshot>> {
        self.shared.slot.lock().clone()
    }

    /// Mount: resolve the blob once, then listen on the key's topic
    ///
    /// # Errors
    /// [`BindingError::AlreadyMounted`] when already mounted.
    pub async fn mount(&self) -> Result<(), BindingError> {
        if self.shared.mounted.swap(true, Ordering::AcqRel) {
            return Err(BindingError::AlreadyMounted);
        }

        let snapshot = self.resolver.resolve_config(&self.key).await;
        self.shared.publish(snapshot);

        let mut subscription = self
            .bus
            .subscribe(Topic::Config(Namespace::new(&self.key)));

        let shared = Arc::clone(&self.shared);
        let resolver = self.resolver.clone();
        let key = self.key.clone();
        let handle = tokio::spawn(async move {
            while subscription.changed().await.is_ok() {
                if !shared.is_mounted() {
                    break;
                }
                let snapshot = resolver.resolve_config(&key).await;
                if !shared.is_mounted() {
                    break;
                }
                shared.publish(snapshot);
            }
        });
        *self.task.lock() = Some(handle);
        Ok(())
    }

    /// Unmount: stop listening
    pub fn unmount(&self) {
        self.shared.mounted.store(false, Ordering::Release);
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
    }
}

impl<F: ContentFetcher> Drop for ConfigBinding<F> {
    fn drop(&mut self) {
        self.shared.mounted.store(false, Ordering::Release);
        if let Some(handle) = self.task.lock().take() {
            handle.abort();
        }
    }
}
