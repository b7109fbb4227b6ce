//! Integration tests for pagequery.
//!
//! These tests drive a [`QueryController`](pagequery::QueryController)
//! end to end against the in-memory backend, the way a list screen of the
//! admin console does.
//!
//! # Running Tests
//!
//! ```bash
//! # Run integration tests
//! cargo test --test integration
//!
//! # Run with controller and engine debug events
//! RUST_LOG=pagequery=debug cargo test --features tracing --test integration -- --nocapture
//!
//! # Run a specific test
//! cargo test --test integration test_search_scenario -- --nocapture
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;
mod controller_tests;
mod engine_tests;
mod source_tests;
