//! Pagination metadata and paginated results.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::{FilterKey, QueryState};
use crate::Error;

/// Where a page sits within the full result set.
///
/// The derived fields (`total_pages`, `has_next`, `has_prev`) are computed
/// from `total`, `page` and `limit` by [`PaginationMeta::new`] and can't be
/// set independently.
///
/// ## Example
///
/// ```rust
/// use pagequery::PaginationMeta;
///
/// let meta = PaginationMeta::new(7, 1, 5);
/// assert_eq!(meta.total_pages(), 2);
/// assert!(meta.has_next());
/// assert!(!meta.has_prev());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    total: u64,
    page: u32,
    limit: u32,
    total_pages: u64,
    has_next: bool,
    has_prev: bool,
}

impl PaginationMeta {
    /// Computes metadata for `page` of a result set of `total` items split
    /// into pages of `limit`.
    ///
    /// `total_pages` is `ceil(total / limit)`, so zero items means zero
    /// pages. A `limit` of `0` is treated as "no pages".
    pub fn new(total: u64, page: u32, limit: u32) -> Self {
        let total_pages = total_pages(total, limit);
        Self {
            total,
            page,
            limit,
            total_pages,
            has_next: u64::from(page) < total_pages,
            has_prev: page > 1,
        }
    }

    /// The neutral zero-state: nothing loaded, page 1.
    pub fn empty(limit: NonZeroU32) -> Self {
        Self::new(0, 1, limit.get())
    }

    /// Total matching items across all pages.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The page this metadata describes.
    #[inline]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The page size.
    #[inline]
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of pages.
    #[inline]
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Whether a later page exists.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Whether an earlier page exists.
    #[inline]
    pub fn has_prev(&self) -> bool {
        self.has_prev
    }

    /// Checks that this metadata is internally consistent.
    ///
    /// Metadata built with [`PaginationMeta::new`] always is; metadata
    /// deserialized from a remote source may not be.
    pub fn validate(&self) -> Result<(), Error> {
        if self.page == 0 {
            return Err(Error::invalid_response("pagination page must be at least 1"));
        }
        if self.limit == 0 {
            return Err(Error::invalid_response("pagination limit must be at least 1"));
        }
        if *self != Self::new(self.total, self.page, self.limit) {
            return Err(Error::invalid_response(format!(
                "inconsistent pagination: total={} page={} limit={} reported \
                 total_pages={} has_next={} has_prev={}",
                self.total, self.page, self.limit, self.total_pages, self.has_next, self.has_prev
            )));
        }
        Ok(())
    }
}

fn total_pages(total: u64, limit: u32) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(u64::from(limit))
}

/// One page of items plus its [`PaginationMeta`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    /// The items on this page, at most `pagination.limit()` of them.
    pub data: Vec<T>,
    /// Position of this page within the full result set.
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResult<T> {
    /// Creates a result from a page of items and its metadata.
    pub fn new(data: Vec<T>, pagination: PaginationMeta) -> Self {
        Self { data, pagination }
    }

    /// An empty result in the neutral zero-state.
    pub fn empty(limit: NonZeroU32) -> Self {
        Self::new(Vec::new(), PaginationMeta::empty(limit))
    }

    /// Checks the metadata and that the page holds no more than `limit`
    /// items.
    pub fn validate(&self) -> Result<(), Error> {
        self.pagination.validate()?;
        let len = self.data.len() as u64;
        if len > u64::from(self.pagination.limit()) {
            return Err(Error::invalid_response(format!(
                "page holds {} items but limit is {}",
                len,
                self.pagination.limit()
            )));
        }
        if len > self.pagination.total() {
            return Err(Error::invalid_response(format!(
                "page holds {} items but total is {}",
                len,
                self.pagination.total()
            )));
        }
        Ok(())
    }

    /// Checks this result as the answer to `params`: [`validate`] plus
    /// `page` and `limit` echoing the request.
    ///
    /// [`validate`]: PaginatedResult::validate
    pub fn validate_for<K: FilterKey>(&self, params: &QueryState<K>) -> Result<(), Error> {
        self.validate()?;
        let meta = &self.pagination;
        if meta.page() != params.page.get() || meta.limit() != params.limit.get() {
            return Err(Error::invalid_response(format!(
                "answered page {} limit {} for a request of page {} limit {}",
                meta.page(),
                meta.limit(),
                params.page,
                params.limit
            )));
        }
        Ok(())
    }
}
