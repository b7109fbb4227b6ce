//! Typed filter keys.

use std::fmt::Debug;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A recognized filter key for one data source.
///
/// Each list screen declares the finite set of fields it can be filtered
/// on as a small enum implementing this trait, so a controller can only be
/// handed filters its data source understands.
///
/// ## Example
///
/// ```rust
/// use pagequery::FilterKey;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// #[serde(rename_all = "camelCase")]
/// enum SermonFilter {
///     Preacher,
///     Series,
/// }
///
/// impl FilterKey for SermonFilter {
///     fn field(&self) -> &'static str {
///         match self {
///             SermonFilter::Preacher => "preacher",
///             SermonFilter::Series => "series",
///         }
///     }
///
///     fn all() -> &'static [Self] {
///         &[SermonFilter::Preacher, SermonFilter::Series]
///     }
/// }
///
/// assert_eq!(SermonFilter::all().len(), 2);
/// ```
pub trait FilterKey:
    Copy + Ord + Hash + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The record field this key is matched against.
    fn field(&self) -> &'static str;

    /// Every key this data source recognizes.
    fn all() -> &'static [Self];

    /// Looks up a key by its field name.
    fn from_field(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|key| key.field() == name)
    }
}

/// Filter key for data sources that accept no filters.
///
/// This type has no values, so a `QueryState<NoFilter>` can never carry a
/// filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NoFilter {}

impl FilterKey for NoFilter {
    fn field(&self) -> &'static str {
        match *self {}
    }

    fn all() -> &'static [Self] {
        &[]
    }
}
