//! Chart provider abstraction and the Yahoo Finance implementation.
//!
//! A provider only moves bytes: it builds the request, checks the HTTP
//! status and hands back the body text. Turning that text into a
//! [`Snapshot`](crate::Snapshot) is the parser's job.

mod request;
mod traits;

pub mod yahoo;

// Re-exports
pub use request::ChartRequest;
pub use traits::ChartProvider;
