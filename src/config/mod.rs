//! Configuration types for pagequery.
//!
//! - [`ControllerConfig`]: Auto-fetch, timeout and default page size for a
//!   [`QueryController`](crate::QueryController)

mod controller;

pub use controller::ControllerConfig;
