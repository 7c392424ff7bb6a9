use crate::errors::MarketDataError;

/// Default chart range: one trading day.
pub const DEFAULT_RANGE: &str = "1d";
/// Default sampling interval inside the range.
pub const DEFAULT_INTERVAL: &str = "1m";

/// What to fetch: one ticker, optionally qualified by an exchange code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChartRequest {
    /// Ticker symbol as typed by the user (e.g. "shop")
    pub symbol: String,
    /// Exchange suffix (e.g. "TO" for Toronto)
    pub exchange: Option<String>,
    /// Chart range (e.g. "1d", "5d")
    pub range: String,
    /// Sampling interval (e.g. "1m", "5m")
    pub interval: String,
}

impl ChartRequest {
    /// Request an intraday chart for `symbol`.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            exchange: None,
            range: DEFAULT_RANGE.to_string(),
            interval: DEFAULT_INTERVAL.to_string(),
        }
    }

    /// Qualify the symbol with an exchange code. Blank codes are ignored.
    pub fn with_exchange(mut self, exchange: Option<impl Into<String>>) -> Self {
        self.exchange = exchange
            .map(Into::into)
            .filter(|e: &String| !e.trim().is_empty());
        self
    }

    /// Symbol as the provider expects it: `SYMBOL` or `SYMBOL.EXCHANGE`.
    pub fn provider_symbol(&self) -> Result<String, MarketDataError> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(MarketDataError::InvalidRequest(
                "symbol must not be empty".to_string(),
            ));
        }
        match &self.exchange {
            Some(exchange) => Ok(format!(
                "{}.{}",
                symbol,
                exchange.trim().trim_start_matches('.').to_uppercase()
            )),
            None => Ok(symbol),
        }
    }
}
