//! The paginated query controller.
//!
//! A [`QueryController`] owns one list screen's [`QueryState`], turns
//! every change of it into a fetch against an injected
//! [`DataSource`], and publishes the latest settled result as a
//! [`ControllerState`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagequery::prelude::*;
//!
//! let documents = InMemorySource::with_items(Document::SEARCHABLE_FIELDS, seed());
//! let controller = QueryController::builder(documents).build()?;
//!
//! controller.set_search("faith");
//! controller.set_sort("title", None);
//!
//! let state = controller.settled().await;
//! println!("{} of {} documents", state.data.len(), state.pagination.total());
//! ```
//!
//! ## Ordering
//!
//! Every fetch is tagged with a request id. A fetch that settles after a
//! newer one was issued is discarded ([`QueryOutcome::Superseded`]), so
//! the published result always belongs to the most recently issued query,
//! whatever order the data source answers in.

mod builder;
mod state;

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::watch;

pub use builder::QueryControllerBuilder;
pub use state::{ControllerState, LoadState, QueryOutcome};

use crate::config::ControllerConfig;
use crate::source::DataSource;
use crate::tracing_support::debug_event;
use crate::types::{
    FieldValue, FilterKey, NoFilter, PaginatedResult, PaginationMeta, QueryOverrides, QueryState,
    SortOrder,
};
use crate::{Error, Result};

type SettleListener<T, K> = Arc<dyn Fn(&QueryController<T, K>, &ControllerState<T, K>) + Send + Sync>;

/// Drives one list screen: owns its query, fetches through a
/// [`DataSource`], and publishes `{data, pagination, loading, error}`.
///
/// `QueryController` is a cheap handle; clones share the same instance.
/// Separately built controllers are fully isolated.
///
/// ## Mutators
///
/// | Method            | Changes                         | Page        |
/// |-------------------|---------------------------------|-------------|
/// | `set_page(n)`     | `page`                          | set to `n`  |
/// | `set_limit(n)`    | `limit`                         | reset to 1  |
/// | `set_sort(f, o)`  | `sort_by`, `sort_order`         | unchanged   |
/// | `set_search(s)`   | `search`                        | reset to 1  |
/// | `set_filter(k, v)`| `filters[k]`                    | reset to 1  |
/// | `clear_filters()` | `search`, `filters`             | reset to 1  |
///
/// Each mutator commits a new `QueryState` snapshot synchronously and,
/// when auto-fetch is on, marks the controller as loading and spawns the
/// fetch. Mutators never fail: fetch errors surface in
/// [`ControllerState::error`].
pub struct QueryController<T, K: FilterKey = NoFilter> {
    inner: Arc<Inner<T, K>>,
}

struct Inner<T, K: FilterKey> {
    source: Arc<dyn DataSource<T, K>>,
    config: ControllerConfig,
    runtime: Handle,
    /// Guards request bookkeeping together with the published snapshot.
    shared: Mutex<Shared<T, K>>,
    state_tx: watch::Sender<ControllerState<T, K>>,
    listeners: Mutex<Vec<SettleListener<T, K>>>,
}

struct Shared<T, K: FilterKey> {
    snapshot: ControllerState<T, K>,
    latest_request: u64,
}

/// A fetch that has been issued and not yet settled.
struct Ticket<K: FilterKey> {
    request_id: u64,
    params: QueryState<K>,
}

impl<T, K: FilterKey> Clone for QueryController<T, K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, K: FilterKey> fmt::Debug for QueryController<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shared = self.inner.shared.lock();
        f.debug_struct("QueryController")
            .field("query", &shared.snapshot.query)
            .field("status", &shared.snapshot.status)
            .field("auto_fetch", &self.inner.config.auto_fetch)
            .finish_non_exhaustive()
    }
}

impl<T, K> QueryController<T, K>
where
    T: Send + Sync + 'static,
    K: FilterKey,
{
    /// Starts building a controller that fetches through `source`.
    pub fn builder(source: impl DataSource<T, K> + 'static) -> QueryControllerBuilder<T, K> {
        QueryControllerBuilder::new(Arc::new(source))
    }

    pub(crate) fn from_parts(
        source: Arc<dyn DataSource<T, K>>,
        config: ControllerConfig,
        runtime: Handle,
        query: QueryState<K>,
    ) -> Self {
        let snapshot = ControllerState::initial(query);
        let (state_tx, _) = watch::channel(snapshot.clone());
        Self {
            inner: Arc::new(Inner {
                source,
                config,
                runtime,
                shared: Mutex::new(Shared {
                    snapshot,
                    latest_request: 0,
                }),
                state_tx,
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    /// Returns the current snapshot.
    pub fn state(&self) -> ControllerState<T, K> {
        self.inner.state_tx.borrow().clone()
    }

    /// Returns the current query.
    pub fn query(&self) -> Arc<QueryState<K>> {
        Arc::clone(&self.inner.state_tx.borrow().query)
    }

    /// Returns the items of the last successful fetch.
    pub fn data(&self) -> Arc<[T]> {
        Arc::clone(&self.inner.state_tx.borrow().data)
    }

    /// Returns the pagination metadata of the last successful fetch.
    pub fn pagination(&self) -> PaginationMeta {
        self.inner.state_tx.borrow().pagination
    }

    /// Returns `true` while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.inner.state_tx.borrow().loading
    }

    /// Returns the message of the last failure, if the last fetch failed.
    pub fn error(&self) -> Option<String> {
        self.inner.state_tx.borrow().error.clone()
    }

    /// Subscribes to snapshot changes.
    ///
    /// A new snapshot is published whenever the query is committed, a fetch
    /// starts, or a fetch settles.
    pub fn subscribe(&self) -> watch::Receiver<ControllerState<T, K>> {
        self.inner.state_tx.subscribe()
    }

    /// Waits until no fetch is in flight and returns that snapshot.
    pub async fn settled(&self) -> ControllerState<T, K> {
        let mut rx = self.subscribe();
        match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// Registers a callback run after every published settlement (success
    /// or failure, never a superseded one).
    ///
    /// Callbacks run with no internal lock held and may call any mutator,
    /// e.g. `refresh()` after a delete.
    pub fn on_settle<F>(&self, listener: F)
    where
        F: Fn(&QueryController<T, K>, &ControllerState<T, K>) + Send + Sync + 'static,
    {
        self.inner.listeners.lock().push(Arc::new(listener));
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// Moves to page `page` (`0` clamps to `1`) without touching anything
    /// else.
    pub fn set_page(&self, page: u32) {
        self.update(|query| query.with_page(page));
    }

    /// Changes the page size (`0` clamps to `1`) and returns to page 1.
    pub fn set_limit(&self, limit: u32) {
        self.update(|query| query.with_limit(limit));
    }

    /// Sorts by `field`.
    ///
    /// Without an explicit `order`, clicking the column that is already
    /// sorted ascending switches to descending; anything else sorts
    /// ascending. The page is left unchanged.
    pub fn set_sort(&self, field: impl Into<String>, order: Option<SortOrder>) {
        let field = field.into();
        self.update(move |query| query.with_sort(field, order));
    }

    /// Sets the search text and returns to page 1.
    pub fn set_search(&self, search: impl Into<String>) {
        let search = search.into();
        self.update(move |query| query.with_search(search));
    }

    /// Sets one filter and returns to page 1. A blank value removes it.
    pub fn set_filter(&self, key: K, value: impl Into<FieldValue>) {
        let value = value.into();
        self.update(move |query| query.with_filter(key, value));
    }

    /// Clears search and filters and returns to page 1. Sort and page size
    /// are kept.
    pub fn clear_filters(&self) {
        self.update(QueryState::cleared);
    }

    /// Re-issues the fetch for the current query.
    ///
    /// Fetches regardless of the auto-fetch setting.
    pub fn refresh(&self) {
        let ticket = self.issue(None);
        self.spawn(ticket, None);
    }

    /// Runs one fetch cycle and waits for it to settle.
    ///
    /// `overrides`, if any, are merged over the current query for this
    /// fetch and committed only if the result is published. Failures are
    /// published as state, never returned.
    pub async fn execute_query(&self, overrides: Option<QueryOverrides<K>>) -> QueryOutcome {
        let ticket = match &overrides {
            Some(overrides) if !overrides.is_empty() => {
                let merged = self.query().merged(overrides);
                self.issue(Some(merged))
            }
            _ => self.issue(None),
        };
        let commit = overrides
            .filter(|overrides| !overrides.is_empty())
            .map(|_| Arc::new(ticket.params.clone()));
        self.run(ticket, commit).await
    }

    // ------------------------------------------------------------------
    // Fetch cycle
    // ------------------------------------------------------------------

    /// Commits the next query and, with auto-fetch, issues its fetch.
    fn update(&self, next: impl FnOnce(&QueryState<K>) -> QueryState<K>) {
        let mut shared = self.inner.shared.lock();
        shared.snapshot.query = Arc::new(next(&shared.snapshot.query));

        if !self.inner.config.auto_fetch {
            self.inner.state_tx.send_replace(shared.snapshot.clone());
            return;
        }

        let ticket = self.issue_locked(&mut shared, None);
        drop(shared);
        self.spawn(ticket, None);
    }

    /// Issues a fetch for `params`, or for the current query when `None`.
    fn issue(&self, params: Option<QueryState<K>>) -> Ticket<K> {
        let mut shared = self.inner.shared.lock();
        self.issue_locked(&mut shared, params)
    }

    fn issue_locked(&self, shared: &mut Shared<T, K>, params: Option<QueryState<K>>) -> Ticket<K> {
        shared.latest_request += 1;
        shared.snapshot.loading = true;
        shared.snapshot.status = LoadState::Loading;
        self.inner.state_tx.send_replace(shared.snapshot.clone());

        let params = params.unwrap_or_else(|| (*shared.snapshot.query).clone());
        debug_event!(
            request_id = shared.latest_request,
            page = params.page.get(),
            limit = params.limit.get(),
            search = %params.search,
            "fetch issued"
        );

        Ticket {
            request_id: shared.latest_request,
            params,
        }
    }

    fn spawn(&self, ticket: Ticket<K>, commit: Option<Arc<QueryState<K>>>) {
        let controller = self.clone();
        self.inner.runtime.spawn(async move {
            controller.run(ticket, commit).await;
        });
    }

    async fn run(&self, ticket: Ticket<K>, commit: Option<Arc<QueryState<K>>>) -> QueryOutcome {
        let result = self.fetch_page(ticket.params).await;
        self.settle(ticket.request_id, result, commit)
    }

    /// Fetches and validates one page. Panics in the data source and
    /// timeouts become errors.
    async fn fetch_page(&self, params: QueryState<K>) -> Result<PaginatedResult<T>> {
        // `fetch` itself runs inside the guard, not only the future it returns.
        let fetch = AssertUnwindSafe(async { self.inner.source.fetch(params.clone()).await })
            .catch_unwind();
        let outcome = match self.inner.config.timeout {
            Some(limit) => tokio::time::timeout(limit, fetch).await?,
            None => fetch.await,
        };
        let page = outcome.map_err(|_| Error::internal("data source panicked"))??;
        page.validate_for(&params)?;
        Ok(page)
    }

    /// Publishes `result` if `request_id` is still the latest request.
    fn settle(
        &self,
        request_id: u64,
        result: Result<PaginatedResult<T>>,
        commit: Option<Arc<QueryState<K>>>,
    ) -> QueryOutcome {
        let (outcome, snapshot) = {
            let mut shared = self.inner.shared.lock();
            if request_id != shared.latest_request {
                debug_event!(
                    request_id,
                    latest = shared.latest_request,
                    "stale fetch result discarded"
                );
                return QueryOutcome::Superseded;
            }

            let snapshot = &mut shared.snapshot;
            let outcome = match result {
                Ok(page) => {
                    if let Some(query) = commit {
                        snapshot.query = query;
                    }
                    debug_event!(
                        request_id,
                        total = page.pagination.total(),
                        returned = page.data.len(),
                        "fetch applied"
                    );
                    snapshot.data = Arc::from(page.data);
                    snapshot.pagination = page.pagination;
                    snapshot.error = None;
                    snapshot.error_kind = None;
                    snapshot.status = LoadState::Success;
                    QueryOutcome::Applied
                }
                Err(err) => {
                    debug_event!(request_id, error = %err, "fetch failed");
                    snapshot.data = Arc::from(Vec::new());
                    snapshot.pagination = PaginationMeta::empty(snapshot.query.limit);
                    snapshot.error = Some(err.to_string());
                    snapshot.error_kind = Some(err.kind());
                    snapshot.status = LoadState::Error;
                    QueryOutcome::Failed(err.kind())
                }
            };
            snapshot.loading = false;

            let snapshot = snapshot.clone();
            self.inner.state_tx.send_replace(snapshot.clone());
            (outcome, snapshot)
        };

        self.notify(&snapshot);
        outcome
    }

    fn notify(&self, snapshot: &ControllerState<T, K>) {
        let listeners: Vec<_> = self.inner.listeners.lock().iter().cloned().collect();
        for listener in listeners {
            listener(self, snapshot);
        }
    }
}
