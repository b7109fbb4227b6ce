//! Query state: what a list screen currently wants to see.

use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use super::{FieldValue, FilterKey, NoFilter};

/// Page size used when nothing else is configured.
pub const DEFAULT_LIMIT: NonZeroU32 = match NonZeroU32::new(20) {
    Some(limit) => limit,
    None => NonZeroU32::MIN,
};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl SortOrder {
    /// Returns `true` for ascending order.
    pub fn is_asc(&self) -> bool {
        matches!(self, SortOrder::Asc)
    }

    /// Returns the wire name (`asc` or `desc`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical description of a list screen's intent: pagination, sort,
/// free-text search and typed filters.
///
/// `QueryState` values are immutable snapshots in practice. Every
/// transition method (`with_page`, `with_sort`, ...) returns a new value
/// and leaves `self` untouched, so a consumer holding an older snapshot can
/// still compare against it.
///
/// `page` and `limit` are [`NonZeroU32`]; transitions given `0` clamp to `1`.
///
/// ## Example
///
/// ```rust
/// use pagequery::{QueryState, SortOrder};
///
/// let state: QueryState = QueryState::default().with_page(3);
/// let sorted = state.with_sort("title", None);
///
/// assert_eq!(sorted.page.get(), 3);
/// assert_eq!(sorted.sort_order, SortOrder::Asc);
/// assert_eq!(sorted.with_sort("title", None).sort_order, SortOrder::Desc);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = ""))]
pub struct QueryState<K: FilterKey = NoFilter> {
    /// Requested page, starting at 1.
    pub page: NonZeroU32,

    /// Page size.
    pub limit: NonZeroU32,

    /// Field to sort by; `None` leaves the source order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    /// Sort direction.
    #[serde(default)]
    pub sort_order: SortOrder,

    /// Free-text search; empty means "no search".
    #[serde(default)]
    pub search: String,

    /// Equality filters, interpreted by the data source.
    #[serde(default = "BTreeMap::new", skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<K, FieldValue>,
}

impl<K: FilterKey> Default for QueryState<K> {
    fn default() -> Self {
        Self::with_limit_default(DEFAULT_LIMIT)
    }
}

fn clamp(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN)
}

impl<K: FilterKey> QueryState<K> {
    /// Creates the default state with the given page size.
    pub fn with_limit_default(limit: NonZeroU32) -> Self {
        Self {
            page: NonZeroU32::MIN,
            limit,
            sort_by: None,
            sort_order: SortOrder::Asc,
            search: String::new(),
            filters: BTreeMap::new(),
        }
    }

    /// The sort field, treating an empty name as unsorted.
    pub fn sort_field(&self) -> Option<&str> {
        self.sort_by.as_deref().filter(|field| !field.is_empty())
    }

    /// Number of items preceding the requested page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.get() - 1) * u64::from(self.limit.get())
    }

    /// Moves to page `page`, leaving every other field as is.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: clamp(page),
            ..self.clone()
        }
    }

    /// Changes the page size and returns to page 1.
    #[must_use]
    pub fn with_limit(&self, limit: u32) -> Self {
        Self {
            page: NonZeroU32::MIN,
            limit: clamp(limit),
            ..self.clone()
        }
    }

    /// Sorts by `field`.
    ///
    /// With an explicit `order` that order is used. Without one the order
    /// toggles: already sorted ascending by `field` becomes descending, and
    /// every other state (another field, or `field` descending) becomes
    /// ascending. The page is left unchanged.
    #[must_use]
    pub fn with_sort(&self, field: impl Into<String>, order: Option<SortOrder>) -> Self {
        let field = field.into();
        let order = order.unwrap_or_else(|| {
            if self.sort_field() == Some(field.as_str()) && self.sort_order.is_asc() {
                SortOrder::Desc
            } else {
                SortOrder::Asc
            }
        });
        Self {
            sort_by: Some(field),
            sort_order: order,
            ..self.clone()
        }
    }

    /// Sets the search text and returns to page 1.
    #[must_use]
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            page: NonZeroU32::MIN,
            search: search.into(),
            ..self.clone()
        }
    }

    /// Sets one filter and returns to page 1.
    ///
    /// A blank value (null or empty text) removes the filter.
    #[must_use]
    pub fn with_filter(&self, key: K, value: impl Into<FieldValue>) -> Self {
        let value = value.into();
        let mut next = Self {
            page: NonZeroU32::MIN,
            ..self.clone()
        };
        if value.is_blank() {
            next.filters.remove(&key);
        } else {
            next.filters.insert(key, value);
        }
        next
    }

    /// Clears search text and filters and returns to page 1. Sort and page
    /// size are kept.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            page: NonZeroU32::MIN,
            search: String::new(),
            filters: BTreeMap::new(),
            ..self.clone()
        }
    }

    /// Applies `overrides` on top of this state.
    #[must_use]
    pub fn merged(&self, overrides: &QueryOverrides<K>) -> Self {
        let mut next = self.clone();
        if let Some(page) = overrides.page {
            next.page = page;
        }
        if let Some(limit) = overrides.limit {
            next.limit = limit;
        }
        if let Some(sort_by) = &overrides.sort_by {
            next.sort_by = sort_by.clone();
        }
        if let Some(order) = overrides.sort_order {
            next.sort_order = order;
        }
        if let Some(search) = &overrides.search {
            next.search.clone_from(search);
        }
        for (key, value) in &overrides.filters {
            if value.is_blank() {
                next.filters.remove(key);
            } else {
                next.filters.insert(*key, value.clone());
            }
        }
        next
    }

    /// Encodes this state as URL query parameters for a REST data source.
    ///
    /// Parameters appear in a fixed order: `page`, `limit`, `sortBy`,
    /// `sortOrder`, `search`, then filters by key. Unset sort and empty
    /// search are omitted.
    ///
    /// ```rust
    /// use pagequery::QueryState;
    ///
    /// let state: QueryState = QueryState::default().with_search("grace & peace");
    /// assert_eq!(state.to_query_string(), "page=1&limit=20&search=grace%20%26%20peace");
    /// ```
    pub fn to_query_string(&self) -> String {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(field) = self.sort_field() {
            pairs.push(("sortBy".to_string(), field.to_string()));
            pairs.push(("sortOrder".to_string(), self.sort_order.to_string()));
        }
        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.clone()));
        }
        for (key, value) in &self.filters {
            pairs.push((key.field().to_string(), value.to_string()));
        }

        pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// A partial [`QueryState`], merged over an existing state.
///
/// Used for a controller's initial query and for
/// [`execute_query`](crate::QueryController::execute_query).
///
/// ```rust
/// use pagequery::{QueryOverrides, QueryState};
///
/// let overrides: QueryOverrides = QueryOverrides::new().limit(50).search("psalm");
/// let state = QueryState::default().merged(&overrides);
/// assert_eq!(state.limit.get(), 50);
/// assert_eq!(state.search, "psalm");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOverrides<K: FilterKey = NoFilter> {
    /// Page override.
    pub page: Option<NonZeroU32>,
    /// Page size override.
    pub limit: Option<NonZeroU32>,
    /// Sort field override; `Some(None)` clears the sort.
    pub sort_by: Option<Option<String>>,
    /// Sort direction override.
    pub sort_order: Option<SortOrder>,
    /// Search text override.
    pub search: Option<String>,
    /// Filters to set (blank values remove the key).
    pub filters: BTreeMap<K, FieldValue>,
}

impl<K: FilterKey> Default for QueryOverrides<K> {
    fn default() -> Self {
        Self {
            page: None,
            limit: None,
            sort_by: None,
            sort_order: None,
            search: None,
            filters: BTreeMap::new(),
        }
    }
}

impl<K: FilterKey> QueryOverrides<K> {
    /// Creates empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the page (`0` clamps to `1`).
    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(clamp(page));
        self
    }

    /// Overrides the page size (`0` clamps to `1`).
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(clamp(limit));
        self
    }

    /// Overrides the sort field and direction.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(Some(field.into()));
        self.sort_order = Some(order);
        self
    }

    /// Overrides the search text.
    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets a filter.
    #[must_use]
    pub fn filter(mut self, key: K, value: impl Into<FieldValue>) -> Self {
        self.filters.insert(key, value.into());
        self
    }

    /// Returns `true` if no field is overridden.
    pub fn is_empty(&self) -> bool {
        self.page.is_none()
            && self.limit.is_none()
            && self.sort_by.is_none()
            && self.sort_order.is_none()
            && self.search.is_none()
            && self.filters.is_empty()
    }
}
