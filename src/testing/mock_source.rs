//! MockSource: a scripted data source for controller tests.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::Error;
use crate::source::{DataSource, FetchFuture};
use crate::types::{FilterKey, NoFilter, PaginatedResult, PaginationMeta, QueryState};

/// A data source that answers from a script and records every query.
///
/// Scripted responses are consumed in order, one per fetch. Once the
/// script runs out, fetches are answered from the default items: the
/// requested page of them, without any search, filter or sort applied.
///
/// Clones share the script and the recorded calls.
///
/// ## Example
///
/// ```rust
/// use std::time::Duration;
/// use pagequery::testing::MockSource;
/// use pagequery::{Error, PaginatedResult, PaginationMeta};
///
/// let mock: MockSource<u32> = MockSource::new();
/// // The first fetch is slow, the second fails, the rest see an empty list.
/// mock.respond_after(
///     Duration::from_millis(300),
///     PaginatedResult::new(vec![1, 2], PaginationMeta::new(2, 1, 20)),
/// );
/// mock.fail(Error::timeout("gateway timed out"));
/// ```
pub struct MockSource<T, K: FilterKey = NoFilter> {
    script: Arc<Mutex<VecDeque<Scripted<T>>>>,
    calls: Arc<Mutex<Vec<QueryState<K>>>>,
    items: Arc<Vec<T>>,
    _filters: PhantomData<fn() -> K>,
}

struct Scripted<T> {
    delay: Option<Duration>,
    result: Result<PaginatedResult<T>, Error>,
}

impl<T, K: FilterKey> Clone for MockSource<T, K> {
    fn clone(&self) -> Self {
        Self {
            script: Arc::clone(&self.script),
            calls: Arc::clone(&self.calls),
            items: Arc::clone(&self.items),
            _filters: PhantomData,
        }
    }
}

impl<T, K: FilterKey> Default for MockSource<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K: FilterKey> MockSource<T, K> {
    /// Creates a mock whose default answer is an empty list.
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Creates a mock whose default answer pages through `items`.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            items: Arc::new(items),
            _filters: PhantomData,
        }
    }

    /// Queues a successful response.
    pub fn respond(&self, page: PaginatedResult<T>) {
        self.push(None, Ok(page));
    }

    /// Queues a successful response delivered after `delay`.
    pub fn respond_after(&self, delay: Duration, page: PaginatedResult<T>) {
        self.push(Some(delay), Ok(page));
    }

    /// Queues a failure.
    pub fn fail(&self, error: Error) {
        self.push(None, Err(error));
    }

    /// Queues a failure delivered after `delay`.
    pub fn fail_after(&self, delay: Duration, error: Error) {
        self.push(Some(delay), Err(error));
    }

    /// Number of queued responses not yet consumed.
    pub fn pending(&self) -> usize {
        self.script.lock().len()
    }

    /// Number of fetches made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Every query fetched so far, oldest first.
    pub fn calls(&self) -> Vec<QueryState<K>> {
        self.calls.lock().clone()
    }

    /// The most recent query fetched.
    pub fn last_call(&self) -> Option<QueryState<K>> {
        self.calls.lock().last().cloned()
    }

    /// Drops queued responses and recorded calls.
    pub fn reset(&self) {
        self.script.lock().clear();
        self.calls.lock().clear();
    }

    fn push(&self, delay: Option<Duration>, result: Result<PaginatedResult<T>, Error>) {
        self.script.lock().push_back(Scripted { delay, result });
    }
}

impl<T: Clone, K: FilterKey> MockSource<T, K> {
    fn default_page(&self, params: &QueryState<K>) -> PaginatedResult<T> {
        let offset = usize::try_from(params.offset()).unwrap_or(usize::MAX);
        let data = self
            .items
            .iter()
            .skip(offset)
            .take(params.limit.get() as usize)
            .cloned()
            .collect();
        let meta = PaginationMeta::new(
            self.items.len() as u64,
            params.page.get(),
            params.limit.get(),
        );
        PaginatedResult::new(data, meta)
    }
}

impl<T, K> DataSource<T, K> for MockSource<T, K>
where
    T: Clone + Send + Sync + 'static,
    K: FilterKey,
{
    fn fetch(&self, params: QueryState<K>) -> FetchFuture<'_, T> {
        let next = self.script.lock().pop_front();
        let scripted = next.unwrap_or_else(|| Scripted {
            delay: None,
            result: Ok(self.default_page(&params)),
        });
        self.calls.lock().push(params);

        Box::pin(async move {
            if let Some(delay) = scripted.delay {
                tokio::time::sleep(delay).await;
            }
            scripted.result
        })
    }
}
