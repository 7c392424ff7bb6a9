//! Quote Market Data Crate
//!
//! This crate turns a finance chart API response into a typed [`Snapshot`]
//! and renders its intraday price series as a fixed-size text chart.
//!
//! # Overview
//!
//! - [`parse_snapshot`] - best-effort field extraction from a raw chart body
//! - [`render_chart`] - column-bar chart with value and time axis labels
//! - [`ChartProvider`] - transport seam; [`YahooChartProvider`] is the default
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  ChartProvider   | --> |   raw body text  |  (HTTP, collaborator side)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |     parser       |  (never fails)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Snapshot      |  (has_data flag)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |      chart       |  (text block)
//!                          +------------------+
//! ```
//!
//! The parser and the chart renderer are pure functions over in-memory data.

pub mod chart;
pub mod errors;
pub mod models;
pub mod parser;
pub mod provider;

pub use chart::{render_chart, render_chart_at, ChartOptions};
pub use errors::MarketDataError;
pub use models::{FetchStats, Snapshot};
pub use parser::parse_snapshot;
pub use provider::yahoo::YahooChartProvider;
pub use provider::{ChartProvider, ChartRequest};
