//! Snapshot extraction from a raw chart API body.
//!
//! This is a best-effort scrape, not a JSON parse. Every lookup that fails
//! leaves its field at the default, so any text yields a [`Snapshot`].
//!
//! # Document shape
//!
//! ```text
//! {"chart":{"result":[{
//!     "meta":{"symbol":"TSLA","regularMarketPrice":250.5,...},
//!     "timestamp":[...],
//!     "indicators":{"quote":[{"close":[...],...}]}
//! }],"error":null}}
//! ```
//!
//! Scalar fields are only looked up inside the meta region (from the `meta`
//! value to the next `"timestamp"` key) so same-named keys deeper in the
//! document are never picked up.

mod scan;

use tracing::debug;

use crate::models::Snapshot;

// Meta keys
const SYMBOL: &str = "symbol";
const LONG_NAME: &str = "longName";
const SHORT_NAME: &str = "shortName";
const CURRENCY: &str = "currency";
const EXCHANGE_NAME: &str = "exchangeName";
const REGULAR_MARKET_PRICE: &str = "regularMarketPrice";
const PREVIOUS_CLOSE: &str = "previousClose";
const CHART_PREVIOUS_CLOSE: &str = "chartPreviousClose";
const DAY_HIGH: &str = "regularMarketDayHigh";
const DAY_LOW: &str = "regularMarketDayLow";
const FIFTY_TWO_WEEK_HIGH: &str = "fiftyTwoWeekHigh";
const FIFTY_TWO_WEEK_LOW: &str = "fiftyTwoWeekLow";
const VOLUME: &str = "regularMarketVolume";

// Structure keys
const META: &str = "meta";
const TIMESTAMP: &str = "timestamp";
const INDICATORS: &str = "indicators";
const QUOTE: &str = "quote";
const CLOSE: &str = "close";
const RESULT: &str = "result";
const ERROR: &str = "error";

/// Parse a raw chart body into a [`Snapshot`].
///
/// Never fails. A body carrying an empty/null result set or an error object
/// short-circuits to `Snapshot::default()` (`has_data == false`).
pub fn parse_snapshot(raw: &str) -> Snapshot {
    if has_empty_result(raw) {
        debug!("Chart body has an empty result set");
        return Snapshot::default();
    }
    if has_error_object(raw) {
        debug!("Chart body carries an error object");
        return Snapshot::default();
    }

    let meta = scan::region(raw, META, TIMESTAMP);

    let name = string_field(meta, LONG_NAME);
    let name = if name.is_empty() {
        string_field(meta, SHORT_NAME)
    } else {
        name
    };

    let mut current_price = number_field(meta, REGULAR_MARKET_PRICE);
    if current_price == 0.0 {
        // Outside market hours the live price is sometimes omitted
        current_price = number_field(meta, CHART_PREVIOUS_CLOSE);
    }

    let mut previous_close = number_field(meta, PREVIOUS_CLOSE);
    if previous_close == 0.0 {
        previous_close = number_field(meta, CHART_PREVIOUS_CLOSE);
    }

    let (prices, timestamps) = parse_series(raw);

    let snapshot = Snapshot {
        symbol: string_field(meta, SYMBOL),
        name,
        currency: string_field(meta, CURRENCY),
        exchange_name: string_field(meta, EXCHANGE_NAME),
        current_price,
        previous_close,
        day_high: number_field(meta, DAY_HIGH),
        day_low: number_field(meta, DAY_LOW),
        fifty_two_week_high: number_field(meta, FIFTY_TWO_WEEK_HIGH),
        fifty_two_week_low: number_field(meta, FIFTY_TWO_WEEK_LOW),
        volume: integer_field(meta, VOLUME),
        prices,
        timestamps,
        has_data: current_price > 0.0,
    };

    debug!(
        "Parsed snapshot for '{}': price={}, points={}, timestamps={}",
        snapshot.symbol,
        snapshot.current_price,
        snapshot.prices.len(),
        snapshot.timestamps.len()
    );

    snapshot
}

/// `"result":null` or `"result":[]`.
fn has_empty_result(raw: &str) -> bool {
    scan::value_offsets(raw, RESULT).any(|offset| {
        let value = &raw[offset..];
        value.starts_with("null")
            || value
                .strip_prefix('[')
                .is_some_and(|inner| inner.trim_start().starts_with(']'))
    })
}

/// `"error":{...}`. A null error is the normal success shape.
fn has_error_object(raw: &str) -> bool {
    scan::value_offsets(raw, ERROR).any(|offset| raw[offset..].starts_with('{'))
}

fn string_field(meta: &str, key: &str) -> String {
    scan::string_value(meta, key).unwrap_or_default()
}

fn number_field(meta: &str, key: &str) -> f64 {
    scan::scalar_token(meta, key)
        .and_then(scan::parse_f64)
        .unwrap_or(0.0)
}

fn integer_field(meta: &str, key: &str) -> u64 {
    scan::scalar_token(meta, key)
        .and_then(scan::parse_i64)
        .and_then(|v| u64::try_from(v).ok())
        .unwrap_or(0)
}

/// Close prices and their trailing-aligned timestamps.
///
/// Tokens are read by position and the raw arrays are aligned at their
/// tails. Every parseable close is kept. Timestamps cover the longest run of
/// most recent kept closes whose aligned timestamp token also parsed, so
/// `timestamps` is always a suffix-aligned partner of `prices`.
fn parse_series(raw: &str) -> (Vec<f64>, Vec<i64>) {
    let quotes = scan::tail_from(scan::tail_from(raw, INDICATORS), QUOTE);
    let closes: Vec<Option<f64>> = scan::array_tokens(quotes, CLOSE)
        .into_iter()
        .map(scan::parse_f64)
        .collect();

    let stamps: Vec<Option<i64>> = scan::array_tokens(raw, TIMESTAMP)
        .into_iter()
        .map(scan::parse_i64)
        .collect();

    let prices: Vec<f64> = closes.iter().flatten().copied().collect();

    let mut timestamps = Vec::new();
    for (index, close) in closes.iter().enumerate().rev() {
        if close.is_none() {
            continue;
        }
        let aligned = (index + stamps.len())
            .checked_sub(closes.len())
            .and_then(|i| stamps.get(i).copied().flatten());
        match aligned {
            Some(ts) => timestamps.push(ts),
            None => break,
        }
    }
    timestamps.reverse();

    (prices, timestamps)
}
