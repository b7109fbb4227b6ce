//! Core types shared by the engine, data sources and the controller.
//!
//! - [`QueryState`]: Pagination, sort, search and filter intent
//! - [`QueryOverrides`]: A partial state merged over an existing one
//! - [`FilterKey`]: Typed filter keys per data source
//! - [`FieldValue`]: A record field as seen by search, sort and filters
//! - [`PaginatedResult`] and [`PaginationMeta`]: One page and its position

mod filter;
mod pagination;
mod query;
mod value;

pub use filter::{FilterKey, NoFilter};
pub use pagination::{PaginatedResult, PaginationMeta};
pub use query::{DEFAULT_LIMIT, QueryOverrides, QueryState, SortOrder};
pub use value::{FieldValue, ToFieldValue};
