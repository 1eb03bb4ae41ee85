//! Resolution policy
//!
//! One entry point per page need: resolve a collection, resolve a filtered
//! collection, resolve a config blob. The policy is the same everywhere:
//! remote data wins when present, defaults fill the gap, pricing merges, and
//! every degradation is absorbed into the snapshot's fault list instead of
//! being raised.

use crate::error::{Fault, FetchError};
use crate::fetch::ContentFetcher;
use crate::merge::{self, MergePolicy};
use crate::registry::DefaultRegistry;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use vitrine_content::{ConfigBlob, ContentRecord, ContentType};

/// Where a snapshot's records came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Remote collection, taken wholesale
    Remote,
    /// Remote data merged over defaults (pricing)
    Merged,
    /// Compiled-in defaults
    Defaults,
}

/// A resolved collection, delivered unconditionally
#[derive(Debug, Clone)]
pub struct Snapshot<R> {
    /// Records in ascending-id order
    pub records: Vec<R>,
    /// Where the records came from
    pub origin: Origin,
    /// Degradations absorbed while producing the snapshot
    pub faults: Vec<Fault>,
}

impl<R> Snapshot<R> {
    /// Whether anything was papered over to deliver this snapshot
    #[inline]
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.faults.is_empty()
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot has no records
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A resolved config blob
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    /// The blob, remote or default
    pub blob: ConfigBlob,
    /// Where the blob came from
    pub origin: Origin,
    /// Degradations absorbed while producing it
    pub faults: Vec<Fault>,
}

/// Case-insensitive category predicate
///
/// Matches against [`ContentRecord::category`]; records without a category
/// never match a filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    category: String,
}

impl CategoryFilter {
    /// Create a filter for one category
    #[inline]
    #[must_use]
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
        }
    }

    /// The category being matched
    #[inline]
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Whether a record belongs to this category
    #[must_use]
    pub fn matches<R: ContentRecord>(&self, record: &R) -> bool {
        record
            .category()
            .is_some_and(|c| c.eq_ignore_ascii_case(&self.category))
    }
}

/// Per-content-type resolution policy over a fetcher and a registry
///
/// Cheap to clone; bindings hold clones and re-resolve on broadcast.
#[derive(Debug)]
pub struct Resolver<F> {
    fetcher: Arc<F>,
    registry: DefaultRegistry,
}

impl<F> Clone for Resolver<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
            registry: self.registry.clone(),
        }
    }
}

impl<F: ContentFetcher> Resolver<F> {
    /// Create a resolver over the built-in defaults
    #[must_use]
    pub fn new(fetcher: F) -> Self {
        Self::with_registry(fetcher, DefaultRegistry::with_defaults())
    }

    /// Create a resolver with a custom registry
    #[must_use]
    pub fn with_registry(fetcher: F, registry: DefaultRegistry) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            registry,
        }
    }

    /// The registry backing this resolver
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &DefaultRegistry {
        &self.registry
    }

    /// Resolve a whole collection
    pub async fn resolve<R: ContentRecord>(&self) -> Snapshot<R> {
        self.resolve_with(None).await
    }

    /// Resolve a collection restricted to one category
    pub async fn resolve_filtered<R: ContentRecord>(&self, filter: &CategoryFilter) -> Snapshot<R> {
        self.resolve_with(Some(filter)).await
    }

    async fn resolve_with<R: ContentRecord>(&self, filter: Option<&CategoryFilter>) -> Snapshot<R> {
        let kind = R::KIND;
        let mut faults = Vec::new();

        let remote = match self.fetcher.fetch_collection(kind).await {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!(%kind, error = %err, "collection fetch failed; using defaults");
                faults.push(transport_fault(kind.to_string(), &err));
                Vec::new()
            }
        };

        let (mut records, origin) = if remote.is_empty() {
            (self.default_records::<R>(&mut faults), Origin::Defaults)
        } else if self.registry.merge_policy(kind) == Some(MergePolicy::ByTitlePrefix) {
            let defaults = self.registry.collection(kind).unwrap_or(&[]);
            let merged = merge::merge_by_title_prefix(defaults, &remote);
            (decode_records::<R>(&merged, &mut faults), Origin::Merged)
        } else {
            (decode_records::<R>(&remote, &mut faults), Origin::Remote)
        };

        for record in &mut records {
            record.normalize();
        }
        if let Some(filter) = filter {
            records.retain(|record| filter.matches(record));
        }
        records.sort_by_key(ContentRecord::id);
        drop_id_collisions(&mut records, kind, &mut faults);

        tracing::debug!(%kind, count = records.len(), ?origin, "collection resolved");
        Snapshot {
            records,
            origin,
            faults,
        }
    }

    /// Resolve a keyed config blob
    ///
    /// Remote blob when present and well-formed, else the registry's default,
    /// else an empty blob. Never fails.
    pub async fn resolve_config(&self, key: &str) -> ConfigSnapshot {
        let mut faults = Vec::new();

        match self.fetcher.fetch_config(key).await {
            Ok(Some(value)) => match ConfigBlob::from_value(key, value) {
                Some(blob) => {
                    return ConfigSnapshot {
                        blob,
                        origin: Origin::Remote,
                        faults,
                    }
                }
                None => {
                    tracing::warn!(key, "config payload is not an object; using default");
                    faults.push(Fault::MalformedConfig {
                        key: key.to_string(),
                    });
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(key, error = %err, "config fetch failed; using default");
                faults.push(transport_fault(key.to_string(), &err));
            }
        }

        let blob = self
            .registry
            .config(key)
            .cloned()
            .unwrap_or_else(|| ConfigBlob::empty(key));
        ConfigSnapshot {
            blob,
            origin: Origin::Defaults,
            faults,
        }
    }

    fn default_records<R: ContentRecord>(&self, faults: &mut Vec<Fault>) -> Vec<R> {
        match self.registry.collection(R::KIND) {
            Some(values) => decode_records(values, faults),
            None => {
                tracing::warn!(kind = %R::KIND, "no registry entry for collection");
                faults.push(Fault::MissingDefaults { kind: R::KIND });
                Vec::new()
            }
        }
    }
}

fn decode_records<R: ContentRecord>(values: &[Value], faults: &mut Vec<Fault>) -> Vec<R> {
    values
        .iter()
        .filter_map(|value| match serde_json::from_value::<R>(value.clone()) {
            Ok(record) => Some(record),
            Err(err) => {
                tracing::warn!(kind = %R::KIND, error = %err, "skipping undecodable record");
                faults.push(Fault::UndecodableRecord {
                    kind: R::KIND,
                    detail: err.to_string(),
                });
                None
            }
        })
        .collect()
}

/// Keep the first record of each id, record a fault for the rest
///
/// Requires `records` sorted by id.
fn drop_id_collisions<R: ContentRecord>(
    records: &mut Vec<R>,
    kind: ContentType,
    faults: &mut Vec<Fault>,
) {
    let mut previous = None;
    records.retain(|record| {
        let id = record.id();
        if previous == Some(id) {
            tracing::warn!(%kind, %id, "duplicate record id; keeping first");
            faults.push(Fault::DuplicateId { kind, id });
            false
        } else {
            previous = Some(id);
            true
        }
    });
}

fn transport_fault(subject: String, err: &FetchError) -> Fault {
    Fault::Transport {
        subject,
        detail: err.to_string(),
    }
}
