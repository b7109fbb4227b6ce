//! Error types for pagequery.
//!
//! A single [`Error`] type covers every failure a data source can report,
//! categorized by [`ErrorKind`].
//!
//! ## Key Invariant
//!
//! Errors never escape a [`QueryController`](crate::QueryController) mutator.
//! A failed fetch is converted into state: the controller's `error` field
//! becomes non-empty and its data is cleared.
//!
//! ```rust,ignore
//! controller.set_search("grace");
//! let state = controller.settled().await;
//! if let Some(message) = &state.error {
//!     eprintln!("could not load list: {message}");
//! }
//! ```

mod core;
mod kind;

pub use core::Error;
pub use kind::ErrorKind;

/// A specialized `Result` type for pagequery operations.
pub type Result<T> = std::result::Result<T, Error>;
