//! Controller configuration.

use std::num::NonZeroU32;
use std::time::Duration;

use crate::types::DEFAULT_LIMIT;

/// Configuration for a [`QueryController`](crate::QueryController).
///
/// ## Default Values
///
/// - `auto_fetch`: `true`
/// - `timeout`: none (a fetch may take as long as it takes)
/// - `default_limit`: 20
///
/// ## Example
///
/// ```rust
/// use pagequery::ControllerConfig;
/// use std::time::Duration;
///
/// // Manual fetching with a ten second ceiling per fetch
/// let config = ControllerConfig::builder()
///     .auto_fetch(false)
///     .timeout(Duration::from_secs(10))
///     .build();
///
/// assert!(!config.auto_fetch);
/// assert_eq!(config.default_limit.get(), 20);
/// ```
#[derive(Debug, Clone, bon::Builder)]
pub struct ControllerConfig {
    /// Whether every query state change triggers a fetch.
    ///
    /// When `false`, mutators only update the query state and the caller
    /// fetches with `execute_query` or `refresh`.
    #[builder(default = true)]
    pub auto_fetch: bool,

    /// Upper bound on a single fetch. A fetch that has not settled by then
    /// settles as a timeout error.
    pub timeout: Option<Duration>,

    /// Page size of a freshly created controller, before initial overrides.
    #[builder(default = DEFAULT_LIMIT)]
    pub default_limit: NonZeroU32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ControllerConfig {
    /// Creates a configuration with automatic fetching disabled.
    pub fn manual() -> Self {
        Self::builder().auto_fetch(false).build()
    }
}
