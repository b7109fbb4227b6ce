//! InMemorySource: a mock backend with real query semantics.

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use super::{DataSource, FetchFuture};
use crate::engine::{Queryable, simulate};
use crate::tracing_support::debug_event;
use crate::types::{FilterKey, NoFilter, QueryState};

/// An in-memory data source answering queries with the reference engine.
///
/// Stands in for a real backend: list screens can be built and tested
/// against it, and a real backend's answers can be compared with its
/// answers for the same collection and query.
///
/// Clones share the same underlying collection, so a test (or an admin
/// form) can mutate the collection while a controller reads from it.
///
/// ## Example
///
/// ```rust
/// use pagequery::{DataSource, InMemorySource, QueryState};
/// use serde_json::json;
///
/// # futures::executor::block_on(async {
/// let source: InMemorySource<serde_json::Value> = InMemorySource::new(["title"]);
/// source.insert(json!({ "title": "Faith" }));
/// source.insert(json!({ "title": "Hope" }));
///
/// let page = source.fetch(QueryState::default().with_search("hope")).await.unwrap();
/// assert_eq!(page.pagination.total(), 1);
/// # });
/// ```
pub struct InMemorySource<T, K: FilterKey = NoFilter> {
    items: Arc<RwLock<Vec<T>>>,
    searchable_fields: Arc<[String]>,
    latency: Option<Duration>,
    _filters: PhantomData<fn() -> K>,
}

impl<T, K: FilterKey> Clone for InMemorySource<T, K> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            searchable_fields: Arc::clone(&self.searchable_fields),
            latency: self.latency,
            _filters: PhantomData,
        }
    }
}

impl<T, K: FilterKey> InMemorySource<T, K> {
    /// Creates an empty source searching the given fields.
    pub fn new<I, S>(searchable_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
            searchable_fields: searchable_fields.into_iter().map(Into::into).collect(),
            latency: None,
            _filters: PhantomData,
        }
    }

    /// Creates a source pre-filled with `items`.
    pub fn with_items<I, S>(searchable_fields: I, items: Vec<T>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let source = Self::new(searchable_fields);
        *source.items.write() = items;
        source
    }

    /// Delays every fetch by `latency`, imitating a network round trip.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// The fields free-text search looks at.
    pub fn searchable_fields(&self) -> impl Iterator<Item = &str> {
        self.searchable_fields.iter().map(String::as_str)
    }

    /// Appends an item.
    pub fn insert(&self, item: T) {
        self.items.write().push(item);
    }

    /// Appends several items.
    pub fn extend(&self, items: impl IntoIterator<Item = T>) {
        self.items.write().extend(items);
    }

    /// Replaces the whole collection.
    pub fn replace_all(&self, items: Vec<T>) {
        *self.items.write() = items;
    }

    /// Keeps only the items for which `keep` returns `true`.
    ///
    /// Returns the number of items removed.
    pub fn retain(&self, keep: impl FnMut(&T) -> bool) -> usize {
        let mut items = self.items.write();
        let before = items.len();
        items.retain(keep);
        before - items.len()
    }

    /// Removes every item.
    pub fn clear(&self) {
        self.items.write().clear();
    }

    /// Number of stored items.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` if there are no stored items.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl<T: Clone, K: FilterKey> InMemorySource<T, K> {
    /// Copies the current collection.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.read().clone()
    }
}

impl<T, K> DataSource<T, K> for InMemorySource<T, K>
where
    T: Queryable + Clone + Send + Sync + 'static,
    K: FilterKey,
{
    fn fetch(&self, params: QueryState<K>) -> FetchFuture<'_, T> {
        Box::pin(async move {
            if let Some(latency) = self.latency {
                tokio::time::sleep(latency).await;
            }

            let result = {
                let items = self.items.read();
                let fields: Vec<&str> = self.searchable_fields().collect();
                simulate(&items, &params, &fields)
            };

            debug_event!(
                total = result.pagination.total(),
                page = params.page.get(),
                returned = result.data.len(),
                "in-memory query simulated"
            );

            Ok(result)
        })
    }
}
