//! Chart provider trait definition.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::Snapshot;
use crate::parser::parse_snapshot;

use super::ChartRequest;

/// Trait for chart data sources.
///
/// Implement this trait to add support for a new endpoint, or to feed
/// canned bodies in tests.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use quote_market_data::{ChartProvider, ChartRequest, MarketDataError};
///
/// struct Fixture(&'static str);
///
/// #[async_trait]
/// impl ChartProvider for Fixture {
///     fn id(&self) -> &'static str {
///         "FIXTURE"
///     }
///
///     async fn fetch_chart(&self, _request: &ChartRequest) -> Result<String, MarketDataError> {
///         Ok(self.0.to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait ChartProvider: Send + Sync {
    /// Unique identifier for this provider, used in errors and logs.
    fn id(&self) -> &'static str;

    /// Fetch the raw chart body for a request.
    ///
    /// Transport failures and non-success statuses are errors. Whatever a
    /// successful response contains is returned untouched.
    async fn fetch_chart(&self, request: &ChartRequest) -> Result<String, MarketDataError>;

    /// Fetch and parse a chart into a [`Snapshot`].
    ///
    /// A body without usable data is not an error: check `has_data`.
    async fn fetch_snapshot(&self, request: &ChartRequest) -> Result<Snapshot, MarketDataError> {
        let body = self.fetch_chart(request).await?;
        Ok(parse_snapshot(&body))
    }
}
