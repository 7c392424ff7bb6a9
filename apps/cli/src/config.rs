use std::time::Duration;

use quote_market_data::provider::yahoo::{DEFAULT_BASE_URL, REQUEST_TIMEOUT};
use quote_market_data::ChartOptions;

/// Log output format for the tracing subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

pub struct Config {
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub chart: ChartOptions,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparseable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = lookup("QUOTE_API_BASE_URL")
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_ms: u64 = lookup("QUOTE_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(REQUEST_TIMEOUT.as_millis() as u64);
        let defaults = ChartOptions::default();
        let width = lookup("QUOTE_CHART_WIDTH")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.width);
        let height = lookup("QUOTE_CHART_HEIGHT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.height);
        let log_format = match lookup("QUOTE_LOG_FORMAT") {
            Some(format) if format.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };
        Self {
            api_base_url,
            request_timeout: Duration::from_millis(timeout_ms),
            chart: ChartOptions { width, height },
            log_format,
        }
    }
}
