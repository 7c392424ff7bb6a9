//! Error types for the market data crate.
//!
//! Only the transport side can fail. Parsing and chart rendering are total
//! over their input and degrade to defaults instead of returning errors.

use thiserror::Error;

/// Errors that can occur while fetching a chart document.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The provider answered 404 for the requested symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The request could not be built (e.g. an empty symbol).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The provider rate limited the request (HTTP 429).
    #[error("Rate limited: {provider}")]
    RateLimited {
        /// The provider that rate limited the request
        provider: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
    },

    /// A provider-specific error occurred, such as a non-success status.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },

    /// A network error occurred while communicating with a provider.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Whether waiting and asking again could plausibly succeed.
    ///
    /// Watch mode uses this to decide how loudly to log a failed cycle.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout { .. } | Self::Network(_)
        )
    }
}
