//! Testing utilities for code built on `pagequery`.
//!
//! - [`MockSource`]: A scripted data source that records every query
//! - [`InMemorySource`](crate::InMemorySource): A data source with real
//!   search, filter and sort semantics
//!
//! ## Quick Start
//!
//! ```rust
//! use pagequery::testing::MockSource;
//! use pagequery::{DataSource, Error, QueryState};
//!
//! # futures::executor::block_on(async {
//! let mock: MockSource<String> = MockSource::with_items(vec!["a".into(), "b".into()]);
//! mock.fail(Error::unavailable("backend restarting"));
//!
//! assert!(mock.fetch(QueryState::default()).await.is_err());
//! assert_eq!(mock.fetch(QueryState::default()).await.unwrap().data.len(), 2);
//! assert_eq!(mock.call_count(), 2);
//! # });
//! ```
//!
//! ## MockSource vs InMemorySource
//!
//! | Feature                 | MockSource | InMemorySource |
//! |-------------------------|------------|----------------|
//! | Records queries         | ✓          | ✗              |
//! | Scripted errors, delays | ✓          | ✗              |
//! | Search / filter / sort  | ✗          | ✓              |
//! | Best for                | Unit tests | Integration tests, demos |

mod mock_source;

pub use mock_source::MockSource;
