//! Append-only local mutation log
//!
//! Records the client created itself: lead inquiries, job applications,
//! cookie consent. Every append persists best-effort and broadcasts on the
//! namespace topic; persistence failure downgrades the receipt, never the
//! broadcast, so other mounted views are not left waiting.

use crate::bus::{ChangeBus, Namespace, Topic};
use crate::store::LocalStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Time-based identity of a locally created record
///
/// Millisecond epoch value, bumped past the last issued id when several
/// records land within one millisecond — strictly increasing per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MutationId(pub u64);

impl MutationId {
    /// Raw id value
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MutationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of one append
///
/// The append itself cannot fail; the receipt says whether the record also
/// made it to persistent storage and how many subscribers heard about it.
#[derive(Debug, Clone)]
pub struct AppendReceipt {
    /// Id the record carries (assigned or pre-existing)
    pub id: MutationId,
    /// Whether the persistent write succeeded
    pub persisted: bool,
    /// Store error message when it did not
    pub detail: Option<String>,
    /// Subscribers that saw the broadcast
    pub notified: usize,
}

/// A visitor's cookie-consent decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentDecision {
    /// Cookies accepted
    Accepted,
    /// Cookies declined
    Declined,
}

/// Append-only, most-recent-first log of locally created records
#[derive(Debug)]
pub struct MutationLog<S> {
    store: Arc<S>,
    bus: ChangeBus,
    last_id: AtomicU64,
}

/// Namespace holding the consent scalar
pub const CONSENT_NAMESPACE: &str = "cookie_consent";

impl<S: LocalStore> MutationLog<S> {
    /// Create a log over a store and a bus
    #[must_use]
    pub fn new(store: S, bus: ChangeBus) -> Self {
        Self::with_shared(Arc::new(store), bus)
    }

    /// Create a log sharing an existing store handle
    #[must_use]
    pub fn with_shared(store: Arc<S>, bus: ChangeBus) -> Self {
        Self {
            store,
            bus,
            last_id: AtomicU64::new(0),
        }
    }

    /// The bus this log publishes on
    #[inline]
    #[must_use]
    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    /// Append one record to a namespace
    ///
    /// Assigns a monotonic time-based id when the record has none, prepends
    /// it to the namespaced list, persists, and broadcasts
    /// [`Topic::Local`] for the namespace — in that order, unconditionally.
    pub fn append(&self, namespace: &Namespace, mut record: Value) -> AppendReceipt {
        let id = match existing_id(&record) {
            Some(id) => id,
            None => {
                let id = self.next_id();
                if let Value::Object(fields) = &mut record {
                    fields.insert("id".to_string(), Value::from(id.raw()));
                }
                id
            }
        };

        let mut list = self.records(namespace);
        list.insert(0, record);

        let (persisted, detail) = match self.store.save(namespace.as_str(), &Value::from(list)) {
            Ok(()) => (true, None),
            Err(err) => {
                tracing::warn!(%namespace, error = %err, "local persist failed; broadcasting anyway");
                (false, Some(err.to_string()))
            }
        };

        let notified = self.bus.publish(Topic::Local(namespace.clone()));
        tracing::debug!(%namespace, %id, persisted, notified, "local record appended");

        AppendReceipt {
            id,
            persisted,
            detail,
            notified,
        }
    }

    /// All records in a namespace, most recent first
    ///
    /// An unreadable or non-list value degrades to an empty list.
    #[must_use]
    pub fn records(&self, namespace: &Namespace) -> Vec<Value> {
        match self.store.load(namespace.as_str()) {
            Ok(Some(Value::Array(list))) => list,
            Ok(Some(_)) => {
                tracing::warn!(%namespace, "namespace holds a non-list value; treating as empty");
                Vec::new()
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!(%namespace, error = %err, "namespace load failed; treating as empty");
                Vec::new()
            }
        }
    }

    /// Record the visitor's cookie decision (a scalar namespace)
    ///
    /// Broadcasts on the consent namespace so a mounted prompt can dismiss
    /// itself everywhere at once.
    pub fn record_consent(&self, decision: ConsentDecision) -> AppendReceipt {
        let namespace = Namespace::new(CONSENT_NAMESPACE);
        let value = serde_json::to_value(decision).unwrap_or(Value::Null);

        let (persisted, detail) = match self.store.save(namespace.as_str(), &value) {
            Ok(()) => (true, None),
            Err(err) => {
                tracing::warn!(error = %err, "consent persist failed; broadcasting anyway");
                (false, Some(err.to_string()))
            }
        };

        let notified = self.bus.publish(Topic::Local(namespace));
        AppendReceipt {
            id: self.next_id(),
            persisted,
            detail,
            notified,
        }
    }

    /// The stored consent decision, if one was ever recorded
    ///
    /// `None` means the prompt should show; anything stored suppresses it
    /// until the entry is cleared externally.
    #[must_use]
    pub fn consent(&self) -> Option<ConsentDecision> {
        match self.store.load(CONSENT_NAMESPACE) {
            Ok(Some(value)) => serde_json::from_value(value).ok(),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, "consent load failed; treating as undecided");
                None
            }
        }
    }

    fn next_id(&self) -> MutationId {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let mut current = self.last_id.load(Ordering::Relaxed);
        loop {
            let candidate = if now > current { now } else { current + 1 };
            match self.last_id.compare_exchange(
                current,
                candidate,
                Ordering::SeqCst,
                Ordering::Relaxed,
            ) {
                Ok(_) => return MutationId(candidate),
                Err(actual) => current = actual,
            }
        }
    }
}

fn existing_id(record: &Value) -> Option<MutationId> {
    record.get("id").and_then(Value::as_u64).map(MutationId)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn log() -> MutationLog<MemoryStore> {
        MutationLog::new(MemoryStore::new(), ChangeBus::new())
    }

    #[test]
    fn append_assigns_id_and_prepends() {
        let log = log();
        let ns = Namespace::new("leads");

        let first = log.append(&ns, json!({"email": "a@example.com"}));
        let second = log.append(&ns, json!({"email": "b@example.com"}));
        assert!(second.id > first.id);

        let records = log.records(&ns);
        assert_eq!(records.len(), 2);
        // most recent first
        assert_eq!(records[0]["email"], "b@example.com");
        assert_eq!(records[0]["id"], second.id.raw());
    }

    #[test]
    fn existing_id_is_kept() {
        let log = log();
        let ns = Namespace::new("leads");
        let receipt = log.append(&ns, json!({"id": 12345, "email": "a@example.com"}));
        assert_eq!(receipt.id, MutationId(12345));
    }

    #[test]
    fn rapid_appends_stay_strictly_monotonic() {
        let log = log();
        let ns = Namespace::new("applications");
        let mut previous = MutationId(0);
        for _ in 0..100 {
            let receipt = log.append(&ns, json!({}));
            assert!(receipt.id > previous);
            previous = receipt.id;
        }
    }

    #[test]
    fn consent_round_trips_and_suppresses_prompt() {
        let log = log();
        assert_eq!(log.consent(), None);

        log.record_consent(ConsentDecision::Accepted);
        assert_eq!(log.consent(), Some(ConsentDecision::Accepted));

        // a second mount still sees the decision
        assert_eq!(log.consent(), Some(ConsentDecision::Accepted));
    }

    #[tokio::test]
    async fn append_broadcasts_on_the_namespace_topic() {
        let log = log();
        let ns = Namespace::new("leads");
        let mut sub = log.bus().subscribe(Topic::Local(ns.clone()));

        let receipt = log.append(&ns, json!({"email": "a@example.com"}));
        assert_eq!(receipt.notified, 1);
        sub.changed().await.unwrap();
    }

    #[test]
    fn non_list_namespace_degrades_to_empty() {
        let store = Arc::new(MemoryStore::new());
        store.save("leads", &json!("scalar")).unwrap();

        let log = MutationLog::with_shared(store, ChangeBus::new());
        assert!(log.records(&Namespace::new("leads")).is_empty());
    }
}
