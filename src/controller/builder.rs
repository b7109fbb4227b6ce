//! Controller builder.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use super::QueryController;
use crate::config::ControllerConfig;
use crate::source::DataSource;
use crate::types::{FilterKey, NoFilter, QueryOverrides, QueryState};
use crate::{Error, Result};

/// Builder for [`QueryController`] instances.
///
/// ## Optional Configuration
///
/// - `config()`: Replace the whole [`ControllerConfig`]
/// - `auto_fetch()`: Fetch on every query change (default `true`)
/// - `timeout()`: Upper bound per fetch
/// - `default_limit()`: Page size before initial overrides
/// - `initial()`: Query overrides applied at construction
///
/// ## Example
///
/// ```rust,ignore
/// use pagequery::{InMemorySource, QueryController, QueryOverrides};
///
/// let controller = QueryController::builder(source)
///     .initial(QueryOverrides::new().limit(50))
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub struct QueryControllerBuilder<T, K: FilterKey = NoFilter> {
    source: Arc<dyn DataSource<T, K>>,
    config: ControllerConfig,
    initial: QueryOverrides<K>,
}

impl<T, K> QueryControllerBuilder<T, K>
where
    T: Send + Sync + 'static,
    K: FilterKey,
{
    pub(super) fn new(source: Arc<dyn DataSource<T, K>>) -> Self {
        Self {
            source,
            config: ControllerConfig::default(),
            initial: QueryOverrides::default(),
        }
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets whether every query change triggers a fetch.
    #[must_use]
    pub fn auto_fetch(mut self, enabled: bool) -> Self {
        self.config.auto_fetch = enabled;
        self
    }

    /// Sets the upper bound on a single fetch.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Sets the page size used before initial overrides (`0` clamps to `1`).
    #[must_use]
    pub fn default_limit(mut self, limit: u32) -> Self {
        self.config.default_limit = NonZeroU32::new(limit).unwrap_or(NonZeroU32::MIN);
        self
    }

    /// Sets overrides merged over the defaults at construction.
    #[must_use]
    pub fn initial(mut self, overrides: QueryOverrides<K>) -> Self {
        self.initial = overrides;
        self
    }

    /// Builds the controller.
    ///
    /// Must be called within a Tokio runtime: the controller spawns its
    /// fetches there. With `auto_fetch` enabled the initial fetch is
    /// issued immediately.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no Tokio runtime is available.
    pub fn build(self) -> Result<QueryController<T, K>> {
        let runtime = Handle::try_current().map_err(|err| {
            Error::configuration("QueryController must be built within a Tokio runtime")
                .with_source(err)
        })?;

        let query = QueryState::with_limit_default(self.config.default_limit).merged(&self.initial);
        let auto_fetch = self.config.auto_fetch;
        let controller = QueryController::from_parts(self.source, self.config, runtime, query);

        if auto_fetch {
            controller.refresh();
        }

        Ok(controller)
    }
}
