//! Analysis pipeline: cache-or-fetch, metrics, deltas, orchestration.
//!
//! - `cache`: idempotent document acquisition
//! - `metrics`: word count, readability, checksum
//! - `delta`: comparison between two metric snapshots
//! - `analyze`: the orchestrator composing the above

pub mod analyze;
pub mod cache;
pub mod delta;
pub mod metrics;

pub use analyze::Analyzer;
pub use cache::{Acquisition, DocumentCache};
pub use delta::compute_delta;
