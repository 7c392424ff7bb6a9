use std::time::Duration;

use clap::Parser;

use crate::watch::MIN_INTERVAL;

/// Default watch-mode refresh interval in seconds.
pub const DEFAULT_INTERVAL_SECS: f64 = 5.0;

#[derive(Parser, Debug)]
#[command(name = "quote", version)]
#[command(about = "Fast, real-time stock quotes in your terminal", long_about = None)]
pub struct Cli {
    /// Ticker symbol (e.g. AAPL)
    pub symbol: Option<String>,

    /// Exchange code appended to the symbol (e.g. TO for SHOP.TO)
    pub exchange: Option<String>,

    /// Keep refreshing until interrupted with Ctrl+C
    #[arg(short, long)]
    pub watch: bool,

    /// Refresh interval for watch mode, in seconds
    #[arg(short, long, value_name = "SECONDS", default_value_t = DEFAULT_INTERVAL_SECS)]
    pub interval: f64,
}

impl Cli {
    /// Whether a non-blank symbol was given.
    pub fn has_symbol(&self) -> bool {
        self.symbol
            .as_deref()
            .is_some_and(|symbol| !symbol.trim().is_empty())
    }

    /// Watch interval, clamped to [`MIN_INTERVAL`].
    pub fn refresh_interval(&self) -> Duration {
        clamp_interval(self.interval)
    }
}

/// Seconds to a `Duration` no shorter than [`MIN_INTERVAL`].
///
/// Negative, NaN and infinite inputs clamp to the minimum as well.
pub fn clamp_interval(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds)
        .map(|interval| interval.max(MIN_INTERVAL))
        .unwrap_or(MIN_INTERVAL)
}
