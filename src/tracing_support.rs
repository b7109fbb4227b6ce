//! Tracing integration for observability.
//!
//! With the `tracing` feature enabled, the controller and the in-memory
//! source emit `debug` events through the `tracing` crate: when a fetch is
//! issued, applied, superseded or failed, and when a simulation runs.
//! Without the feature the events compile to nothing.
//!
//! ## Example
//!
//! ```rust,ignore
//! use tracing_subscriber::EnvFilter;
//!
//! tracing_subscriber::fmt()
//!     .with_env_filter(EnvFilter::new("pagequery=debug"))
//!     .init();
//!
//! controller.set_search("faith");
//! // DEBUG pagequery::controller: fetch issued request_id=3 page=1 search="faith"
//! ```

macro_rules! debug_event {
    ($($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!($($arg)+);
        }
    };
}

pub(crate) use debug_event;
