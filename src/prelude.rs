//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy importing:
//!
//! ```rust
//! use pagequery::prelude::*;
//! ```
//!
//! This provides access to:
//! - The controller and its state
//! - Query and pagination types
//! - Data sources and the reference engine
//! - Error types
//! - Admin-console records and their filters

pub use crate::{
    config::ControllerConfig,
    controller::{ControllerState, LoadState, QueryController, QueryOutcome},
    engine::{Queryable, simulate},
    error::{Error, ErrorKind, Result},
    models::{
        Document, DocumentFilter, Language, Media, MediaFilter, MediaKind, Subscriber,
        SubscriberFilter, Tag, Version, VersionFilter,
    },
    source::{DataSource, InMemorySource, source_fn},
    types::{
        FieldValue, FilterKey, NoFilter, PaginatedResult, PaginationMeta, QueryOverrides,
        QueryState, SortOrder,
    },
};
