// src/pipeline/delta.rs

//! Historical comparison between two metric snapshots.

use crate::error::{AppError, Result};
use crate::models::{Delta, Metrics};

/// Compute the change from `first` to `second` (second minus first).
///
/// Both snapshots must belong to the same agency; comparing unrelated
/// metrics is a usage error and fails with [`AppError::AgencyMismatch`].
pub fn compute_delta(first: &Metrics, second: &Metrics) -> Result<Delta> {
    if first.agency != second.agency {
        return Err(AppError::AgencyMismatch {
            left: first.agency.clone(),
            right: second.agency.clone(),
        });
    }

    Ok(Delta {
        from: first.date,
        to: second.date,
        word_count: second.word_count as i64 - first.word_count as i64,
        readability: second.readability - first.readability,
        checksum_changed: first.checksum != second.checksum,
    })
}
