//! One ticker's fetch session.
//!
//! Owns the provider and the request, and keeps the fetch metadata that has
//! to outlive each freshly parsed snapshot.

use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use quote_market_data::{ChartProvider, ChartRequest, FetchStats, MarketDataError, Snapshot};
use tracing::{debug, warn};

pub struct QuoteSession {
    provider: Arc<dyn ChartProvider>,
    request: ChartRequest,
    stats: FetchStats,
}

impl QuoteSession {
    pub fn new(provider: Arc<dyn ChartProvider>, request: ChartRequest) -> Self {
        Self {
            provider,
            request,
            stats: FetchStats::default(),
        }
    }

    pub fn stats(&self) -> &FetchStats {
        &self.stats
    }

    /// Symbol to show when the response carries none.
    pub fn label(&self) -> String {
        self.request
            .provider_symbol()
            .unwrap_or_else(|_| self.request.symbol.clone())
    }

    /// Fetch and parse one snapshot.
    ///
    /// Stats are updated whether or not the fetch succeeds.
    pub async fn refresh(&mut self) -> Result<Snapshot, MarketDataError> {
        let started = Instant::now();
        let result = self.provider.fetch_snapshot(&self.request).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.stats.record(Local::now(), elapsed_ms);

        match &result {
            Ok(snapshot) if snapshot.has_data => debug!(
                "{} fetched {} in {} ms",
                self.provider.id(),
                snapshot.symbol,
                elapsed_ms
            ),
            Ok(_) => warn!("No valid data for {}", self.label()),
            Err(e) if e.is_transient() => warn!("Fetch for {} failed, will retry: {}", self.label(), e),
            Err(e) => warn!("Fetch for {} failed: {}", self.label(), e),
        }

        result
    }
}
