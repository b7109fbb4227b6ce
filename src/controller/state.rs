//! Observable controller state.

use std::fmt;
use std::sync::Arc;

use crate::ErrorKind;
use crate::types::{FilterKey, NoFilter, PaginationMeta, QueryState};

/// Where a controller is in its fetch cycle.
///
/// ```text
/// Idle ──▶ Loading ──▶ Success ──▶ Loading ──▶ ...
///                 └──▶ Error   ──▶ Loading ──▶ ...
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoadState {
    /// Nothing fetched yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The latest fetch succeeded.
    Success,
    /// The latest fetch failed.
    Error,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadState::Idle => write!(f, "idle"),
            LoadState::Loading => write!(f, "loading"),
            LoadState::Success => write!(f, "success"),
            LoadState::Error => write!(f, "error"),
        }
    }
}

/// How one fetch cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The result was published.
    Applied,
    /// The fetch failed and the error was published.
    Failed(ErrorKind),
    /// A newer fetch was issued before this one settled; its result was
    /// discarded.
    Superseded,
}

impl QueryOutcome {
    /// Returns `true` if the result was published.
    pub fn is_applied(&self) -> bool {
        matches!(self, QueryOutcome::Applied)
    }
}

/// A snapshot of everything a list view renders.
///
/// Snapshots are cheap to clone: the query and the page of items are
/// shared.
pub struct ControllerState<T, K: FilterKey = NoFilter> {
    /// The query the controller currently holds.
    pub query: Arc<QueryState<K>>,
    /// Items of the last successful fetch; empty after a failure.
    pub data: Arc<[T]>,
    /// Metadata of the last successful fetch; the neutral zero-state after
    /// a failure.
    pub pagination: PaginationMeta,
    /// `true` while a fetch is in flight.
    pub loading: bool,
    /// Message of the last failure, cleared by the next success.
    pub error: Option<String>,
    /// Kind of the last failure.
    pub error_kind: Option<ErrorKind>,
    /// Fetch cycle position.
    pub status: LoadState,
}

impl<T, K: FilterKey> ControllerState<T, K> {
    pub(crate) fn initial(query: QueryState<K>) -> Self {
        let pagination = PaginationMeta::empty(query.limit);
        Self {
            query: Arc::new(query),
            data: Arc::from(Vec::new()),
            pagination,
            loading: false,
            error: None,
            error_kind: None,
            status: LoadState::Idle,
        }
    }

    /// Returns `true` if the last fetch failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl<T, K: FilterKey> Clone for ControllerState<T, K> {
    fn clone(&self) -> Self {
        Self {
            query: Arc::clone(&self.query),
            data: Arc::clone(&self.data),
            pagination: self.pagination,
            loading: self.loading,
            error: self.error.clone(),
            error_kind: self.error_kind,
            status: self.status,
        }
    }
}

impl<T: fmt::Debug, K: FilterKey> fmt::Debug for ControllerState<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerState")
            .field("query", &self.query)
            .field("data", &self.data)
            .field("pagination", &self.pagination)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .field("status", &self.status)
            .finish()
    }
}
