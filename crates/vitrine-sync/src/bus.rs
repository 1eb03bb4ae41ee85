//! Typed-topic change broadcast
//!
//! One bus per application instance. Topics are typed per collection,
//! namespace, or config key so a pricing page never re-resolves because a
//! lead was captured elsewhere — unless it subscribed to that namespace.
//!
//! Delivery is best-effort fan-out: publishing with no subscribers is fine,
//! and a lagged receiver just treats the gap as "something changed".

use tokio::sync::broadcast;
use vitrine_content::ContentType;

use std::fmt;
use std::sync::Arc;

/// Cheap cloneable identifier for a local namespace or config key
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Namespace(Arc<str>);

impl Namespace {
    /// Create a namespace id
    #[inline]
    #[must_use]
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    /// The namespace string
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Namespace {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// What changed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    /// A remote collection's content is (eventually) different
    Content(ContentType),
    /// A local mutation namespace gained a record
    Local(Namespace),
    /// A config blob under this key changed
    Config(Namespace),
}

/// The bus itself is closed (every sender dropped)
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("change bus closed")]
pub struct BusClosed;

/// Application-instance-wide change signal
///
/// Carries no payload beyond the topic: receivers re-resolve rather than
/// inspect a delta.
#[derive(Debug, Clone)]
pub struct ChangeBus {
    sender: broadcast::Sender<Topic>,
}

impl ChangeBus {
    /// Default channel depth before a slow receiver lags
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Create a bus with the default capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Create a bus with a specific channel capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a change; returns how many receivers saw it
    ///
    /// Publishing with zero subscribers is a no-op, never a failure.
    pub fn publish(&self, topic: Topic) -> usize {
        match self.sender.send(topic.clone()) {
            Ok(count) => {
                tracing::debug!(?topic, receivers = count, "change published");
                count
            }
            Err(_) => {
                tracing::debug!(?topic, "change published with no subscribers");
                0
            }
        }
    }

    /// Subscribe to one topic
    #[must_use]
    pub fn subscribe(&self, topic: Topic) -> Subscription {
        self.subscribe_many(vec![topic])
    }

    /// Subscribe to several topics at once
    #[must_use]
    pub fn subscribe_many(&self, topics: Vec<Topic>) -> Subscription {
        Subscription {
            topics,
            receiver: self.sender.subscribe(),
        }
    }

    /// Current subscriber count (all topics)
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

/// A filtered view onto the bus
///
/// Yields only events for its topics; events for other topics are skipped
/// without waking the caller's logic.
#[derive(Debug)]
pub struct Subscription {
    topics: Vec<Topic>,
    receiver: broadcast::Receiver<Topic>,
}

impl Subscription {
    /// Wait until one of the subscribed topics fires
    ///
    /// A lagged receiver returns `Ok` immediately: some events were missed,
    /// and the caller's full re-resolve covers whatever they were.
    ///
    /// # Errors
    /// [`BusClosed`] once every bus handle is gone.
    pub async fn changed(&mut self) -> Result<(), BusClosed> {
        loop {
            match self.receiver.recv().await {
                Ok(topic) if self.topics.contains(&topic) => return Ok(()),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::debug!(missed, "subscription lagged; treating as changed");
                    return Ok(());
                }
                Err(broadcast::error::RecvError::Closed) => return Err(BusClosed),
            }
        }
    }

    /// The topics this subscription listens for
    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscriber_sees_its_topic() {
        let bus = ChangeBus::new();
        let mut sub = bus.subscribe(Topic::Content(ContentType::Pricing));

        bus.publish(Topic::Content(ContentType::Pricing));
        sub.changed().await.unwrap();
    }

    #[tokio::test]
    async fn unrelated_topics_are_filtered_out() {
        let bus = ChangeBus::new();
        let mut sub = bus.subscribe(Topic::Content(ContentType::Pricing));

        bus.publish(Topic::Content(ContentType::Job));
        bus.publish(Topic::Local(Namespace::new("leads")));
        bus.publish(Topic::Content(ContentType::Pricing));

        // only the third event wakes the subscription
        sub.changed().await.unwrap();
        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            sub.changed(),
        )
        .await;
        assert!(pending.is_err(), "no further matching events expected");
    }

    #[tokio::test]
    async fn multi_topic_subscription_matches_any() {
        let bus = ChangeBus::new();
        let mut sub = bus.subscribe_many(vec![
            Topic::Content(ContentType::Pricing),
            Topic::Local(Namespace::new("leads")),
        ]);

        bus.publish(Topic::Local(Namespace::new("leads")));
        sub.changed().await.unwrap();
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_a_noop() {
        let bus = ChangeBus::new();
        assert_eq!(bus.publish(Topic::Content(ContentType::Faq)), 0);
    }

    #[tokio::test]
    async fn lagged_receiver_treats_gap_as_changed() {
        let bus = ChangeBus::with_capacity(2);
        let mut sub = bus.subscribe(Topic::Content(ContentType::Faq));

        for _ in 0..8 {
            bus.publish(Topic::Content(ContentType::Faq));
        }
        sub.changed().await.unwrap();
    }

    #[tokio::test]
    async fn closed_bus_surfaces_to_subscribers() {
        let bus = ChangeBus::new();
        let mut sub = bus.subscribe(Topic::Content(ContentType::Faq));
        drop(bus);
        assert_eq!(sub.changed().await.unwrap_err(), BusClosed);
    }
}
