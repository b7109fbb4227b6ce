//! The fetch capability a controller consumes.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::Error;
use crate::types::{FilterKey, NoFilter, PaginatedResult, QueryState};

/// Boxed future returned by [`DataSource::fetch`].
pub type FetchFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<PaginatedResult<T>, Error>> + Send + 'a>>;

/// Object-safe trait for anything that can answer a [`QueryState`] with a
/// page of items.
///
/// A data source may be backed by a network call or by the reference
/// engine ([`InMemorySource`](crate::InMemorySource)); the controller
/// can't tell the difference.
///
/// ## Contract
///
/// Resolve with a [`PaginatedResult`] whose metadata obeys the pagination
/// formula (see [`PaginatedResult::validate`]), or with an [`Error`]. The
/// controller validates every result and treats a malformed one as a
/// failure.
///
/// ## Example
///
/// ```rust
/// use pagequery::{DataSource, FetchFuture, PaginatedResult, QueryState};
///
/// struct AlwaysEmpty;
///
/// impl DataSource<String> for AlwaysEmpty {
///     fn fetch(&self, params: QueryState) -> FetchFuture<'_, String> {
///         Box::pin(async move { Ok(PaginatedResult::empty(params.limit)) })
///     }
/// }
/// ```
pub trait DataSource<T, K: FilterKey = NoFilter>: Send + Sync {
    /// Fetches the page described by `params`.
    fn fetch(&self, params: QueryState<K>) -> FetchFuture<'_, T>;
}

impl<T, K, S> DataSource<T, K> for Arc<S>
where
    K: FilterKey,
    S: DataSource<T, K> + ?Sized,
{
    fn fetch(&self, params: QueryState<K>) -> FetchFuture<'_, T> {
        (**self).fetch(params)
    }
}

/// A [`DataSource`] backed by an async function. Created by [`source_fn`].
#[derive(Clone)]
pub struct FnSource<F> {
    f: F,
}

/// Wraps an async function as a [`DataSource`].
///
/// ```rust
/// use pagequery::{PaginatedResult, PaginationMeta, QueryState, source_fn};
///
/// let source = source_fn(|params: QueryState| async move {
///     let items = vec!["a".to_string(), "b".to_string()];
///     let meta = PaginationMeta::new(2, params.page.get(), params.limit.get());
///     Ok::<_, pagequery::Error>(PaginatedResult::new(items, meta))
/// });
/// # let _ = source;
/// ```
pub fn source_fn<F>(f: F) -> FnSource<F> {
    FnSource { f }
}

impl<T, K, F, Fut> DataSource<T, K> for FnSource<F>
where
    K: FilterKey,
    F: Fn(QueryState<K>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<PaginatedResult<T>, Error>> + Send + 'static,
{
    fn fetch(&self, params: QueryState<K>) -> FetchFuture<'_, T> {
        Box::pin((self.f)(params))
    }
}
