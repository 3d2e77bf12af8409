//! Structured analysis results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::models::{ChapterSection, Delta, Metrics};

/// A per-title failure recorded within an otherwise successful analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleFailure {
    /// Title that could not be analyzed
    pub title: u32,

    /// What went wrong
    pub error: String,

    /// Whether retrying may succeed
    pub retryable: bool,
}

impl TitleFailure {
    pub fn new(title: u32, error: &AppError) -> Self {
        Self {
            title,
            error: error.to_string(),
            retryable: error.is_retryable(),
        }
    }
}

/// Analysis of one agency on one date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateReport {
    pub date: NaiveDate,
    pub metrics: Metrics,

    /// Titles that contributed text to the metrics
    pub titles_analyzed: Vec<u32>,

    /// Extracted sections in reference order
    pub chapters: Vec<ChapterSection>,

    /// Titles skipped due to fetch or parse failures
    pub failures: Vec<TitleFailure>,
}

/// Chapter sections for one agency/date, without metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateChapters {
    pub date: NaiveDate,
    pub chapters: Vec<ChapterSection>,
    pub failures: Vec<TitleFailure>,
}

/// Full result of an analysis request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Agency slug
    pub agency: String,

    /// Agency display name
    pub agency_name: String,

    /// One entry per requested date, in request order
    pub dates: Vec<DateReport>,

    /// Present iff exactly two dates were requested
    pub delta: Option<Delta>,
}
