use chrono::{DateTime, Local};
use serde::Serialize;

/// The parsed result of one fetch attempt.
///
/// A fresh `Snapshot` is built for every response body. Absent or malformed
/// fields keep their defaults; `has_data` is the only success signal.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub symbol: String,
    pub name: String,
    pub currency: String,
    pub exchange_name: String,

    /// Live price, or the previous chart close outside market hours
    pub current_price: f64,
    pub previous_close: f64,
    pub day_high: f64,
    pub day_low: f64,
    pub fifty_two_week_high: f64,
    pub fifty_two_week_low: f64,
    pub volume: u64,

    /// Chronological close values
    pub prices: Vec<f64>,

    /// Unix seconds for the most recent `timestamps.len()` entries of `prices`
    pub timestamps: Vec<i64>,

    /// True iff `current_price > 0`
    pub has_data: bool,
}

impl Snapshot {
    /// Absolute change against the previous close, `0.0` without a previous close.
    pub fn change(&self) -> f64 {
        if self.previous_close == 0.0 {
            return 0.0;
        }
        self.current_price - self.previous_close
    }

    /// Percent change against the previous close.
    pub fn change_percent(&self) -> Option<f64> {
        if self.previous_close == 0.0 {
            return None;
        }
        Some(self.change() / self.previous_close * 100.0)
    }
}

/// The timestamp paired with `prices[index]` when the two sequences are
/// aligned at their most recent ends.
pub fn aligned_timestamp(prices_len: usize, timestamps: &[i64], index: usize) -> Option<i64> {
    if index >= prices_len {
        return None;
    }
    (index + timestamps.len())
        .checked_sub(prices_len)
        .and_then(|i| timestamps.get(i).copied())
}

/// Fetch-level metadata owned by the caller.
///
/// Survives across snapshots: a new parse pass never resets it.
#[derive(Clone, Debug, Default)]
pub struct FetchStats {
    pub last_fetch_time: Option<DateTime<Local>>,
    pub fetch_duration_ms: u64,
}

impl FetchStats {
    /// Record a finished fetch attempt.
    pub fn record(&mut self, finished_at: DateTime<Local>, duration_ms: u64) {
        self.last_fetch_time = Some(finished_at);
        self.fetch_duration_ms = duration_ms;
    }
}
