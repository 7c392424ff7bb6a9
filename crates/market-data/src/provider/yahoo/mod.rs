//! Yahoo Finance chart provider.
//!
//! # API Endpoint
//!
//! - Chart: `https://query1.finance.yahoo.com/v8/finance/chart/{symbol}?range=1d&interval=1m`
//!
//! Exchange-qualified tickers use Yahoo's suffix form (e.g. `SHOP.TO`).
//! The endpoint needs no authentication; a browser user agent avoids the
//! bare-client rejections Yahoo sometimes serves.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};
use urlencoding::encode;

use crate::errors::MarketDataError;
use crate::provider::{ChartProvider, ChartRequest};

const PROVIDER_ID: &str = "YAHOO";

/// Default chart endpoint; the provider symbol is appended as a path segment.
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Default HTTP request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance chart provider.
///
/// One blocking-style request per call: no pooling contract, no retries.
pub struct YahooChartProvider {
    client: Client,
    base_url: String,
}

impl YahooChartProvider {
    /// Create a provider against the public endpoint with the default timeout.
    pub fn new() -> Self {
        Self::with_config(DEFAULT_BASE_URL, REQUEST_TIMEOUT)
    }

    /// Create a provider against a custom endpoint.
    pub fn with_config(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Full chart URL for a request.
    pub fn chart_url(&self, request: &ChartRequest) -> Result<String, MarketDataError> {
        let symbol = request.provider_symbol()?;
        Ok(format!(
            "{}/{}?range={}&interval={}",
            self.base_url,
            encode(&symbol),
            encode(&request.range),
            encode(&request.interval)
        ))
    }
}

impl Default for YahooChartProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a non-success status to an error, `None` for 2xx.
fn status_error(status: StatusCode, symbol: &str) -> Option<MarketDataError> {
    if status.is_success() {
        return None;
    }
    Some(match status {
        StatusCode::NOT_FOUND => MarketDataError::SymbolNotFound(symbol.to_string()),
        StatusCode::TOO_MANY_REQUESTS => MarketDataError::RateLimited {
            provider: PROVIDER_ID.to_string(),
        },
        _ => MarketDataError::ProviderError {
            provider: PROVIDER_ID.to_string(),
            message: format!("HTTP error: {}", status),
        },
    })
}

fn transport_error(error: reqwest::Error) -> MarketDataError {
    if error.is_timeout() {
        MarketDataError::Timeout {
            provider: PROVIDER_ID.to_string(),
        }
    } else {
        MarketDataError::Network(error)
    }
}

#[async_trait]
impl ChartProvider for YahooChartProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_chart(&self, request: &ChartRequest) -> Result<String, MarketDataError> {
        let url = self.chart_url(request)?;
        debug!("Fetching chart: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if let Some(error) = status_error(status, &request.provider_symbol()?) {
            warn!("Chart request for {} failed with {}", request.symbol, status);
            return Err(error);
        }

        response.text().await.map_err(transport_error)
    }
}
