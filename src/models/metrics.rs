//! Metric snapshot and delta data structures.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Descriptive metrics for one agency on one date.
///
/// A pure function of the chapter sections for that agency/date: re-running
/// the pipeline over the same cached XML yields a bit-identical snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Metrics {
    /// Agency slug
    pub agency: String,

    /// Snapshot date
    pub date: NaiveDate,

    /// Whitespace-delimited token count over all chapter bodies
    pub word_count: u64,

    /// Flesch-Kincaid grade level (may be negative for short text)
    pub readability: f64,

    /// Lowercase hex SHA-256 of the concatenated chapter text
    pub checksum: String,
}

/// Change between two metric snapshots of the same agency.
///
/// Differences are `to` minus `from` (second date minus first).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Delta {
    pub from: NaiveDate,
    pub to: NaiveDate,

    /// Signed word count difference
    pub word_count: i64,

    /// Signed readability grade difference
    pub readability: f64,

    /// True iff the two checksums differ
    pub checksum_changed: bool,
}
