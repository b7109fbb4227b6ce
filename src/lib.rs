//! # pagequery
//!
//! Paginated query state for list screens: a controller that turns search,
//! sort, filter and page changes into fetches, and a reference engine that
//! answers those queries over an in-memory collection.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagequery::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pagequery::Error> {
//!     // A mock backend with real search/filter/sort semantics
//!     let source = InMemorySource::with_items(Document::SEARCHABLE_FIELDS, load_documents());
//!
//!     // Fetches page 1 immediately
//!     let documents = QueryController::builder(source).build()?;
//!
//!     documents.set_search("grace");
//!     documents.set_filter(DocumentFilter::Category, "sermon");
//!     documents.set_sort("created_at", Some(SortOrder::Desc));
//!
//!     let state = documents.settled().await;
//!     println!(
//!         "page {} of {}: {} documents",
//!         state.pagination.page(),
//!         state.pagination.total_pages(),
//!         state.data.len(),
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Key Concepts
//!
//! - **Snapshots**: every mutator commits a new `QueryState`; earlier
//!   snapshots held by a view are never changed
//! - **Page reset**: changing search, filters or page size returns to page 1;
//!   changing the sort keeps the page
//! - **Latest wins**: a response that arrives after a newer query was issued
//!   is discarded
//! - **Errors are state**: fetch failures land in `ControllerState::error`,
//!   mutators never fail
//!
//! ## Features
//!
//! - `tracing`: Emit `debug` events for every fetch and simulation
//! - `derive`: Enable `#[derive(Queryable)]`

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

// Lets `#[derive(Queryable)]` resolve `::pagequery` inside this crate.
extern crate self as pagequery;

// Core modules
pub mod config;
pub mod error;
pub mod types;

// Query engine and data sources
pub mod engine;
pub mod source;

// Controller
pub mod controller;

// Admin-console records
pub mod models;

// Testing utilities
pub mod testing;

// Tracing support
mod tracing_support;

// Prelude for convenient imports
pub mod prelude;

// Re-export main types at crate root for convenience
pub use controller::{
    ControllerState, LoadState, QueryController, QueryControllerBuilder, QueryOutcome,
};
pub use error::{Error, ErrorKind, Result};
pub use types::{
    DEFAULT_LIMIT, FieldValue, FilterKey, NoFilter, PaginatedResult, PaginationMeta,
    QueryOverrides, QueryState, SortOrder, ToFieldValue,
};

// Re-export config types
pub use config::ControllerConfig;

// Re-export engine and sources
pub use engine::{Queryable, simulate};
pub use source::{DataSource, FetchFuture, FnSource, InMemorySource, source_fn};

// Derive macro shares its name with the trait, as serde's do
#[cfg(feature = "derive")]
#[cfg_attr(docsrs, doc(cfg(feature = "derive")))]
pub use pagequery_derive::Queryable;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_root_reexports() {
        let query: QueryState = QueryState::default();
        assert_eq!(query.limit, DEFAULT_LIMIT);
        assert_eq!(ErrorKind::from_http_status(504), ErrorKind::Timeout);
        assert!(ControllerConfig::default().auto_fetch);
    }
}
