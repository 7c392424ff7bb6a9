//! Market data models
//!
//! - `snapshot` - Parsed chart result (Snapshot) and caller-owned fetch metadata (FetchStats)

mod snapshot;

pub use snapshot::{aligned_timestamp, FetchStats, Snapshot};
