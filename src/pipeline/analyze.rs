// src/pipeline/analyze.rs

//! Analysis pipeline orchestration.
//!
//! Composes the reference table, document cache, extractor, and metrics
//! engine into one structured result per request. A failure acquiring or
//! extracting a single title degrades that date's chapter list and is
//! recorded as an annotation; it never aborts the whole request.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{
    Agency, AgencyIndex, AgencySummary, AnalysisReport, ChapterSection, Config, DateChapters,
    DateReport, TitleFailure,
};
use crate::pipeline::cache::DocumentCache;
use crate::pipeline::{delta, metrics};
use crate::services::{self, TitleSource};
use crate::storage::DocumentStore;

/// Assembled sections for one agency/date before metrics computation.
#[derive(Debug, Default)]
struct DateAssembly {
    chapters: Vec<ChapterSection>,
    titles_analyzed: Vec<u32>,
    failures: Vec<TitleFailure>,
}

/// Orchestrator for agency analysis requests.
pub struct Analyzer {
    config: Arc<Config>,
    index: Arc<AgencyIndex>,
    cache: DocumentCache,
}

impl Analyzer {
    /// Create an analyzer over a reference table, store, and title source.
    pub fn new(
        config: Arc<Config>,
        index: Arc<AgencyIndex>,
        store: Arc<dyn DocumentStore>,
        source: Arc<dyn TitleSource>,
    ) -> Self {
        Self {
            config,
            index,
            cache: DocumentCache::new(store, source),
        }
    }

    /// Static reference table passthrough.
    pub fn list_agencies(&self) -> Vec<AgencySummary> {
        self.index.list()
    }

    /// Analyze an agency's regulation text on one or two dates.
    ///
    /// With two dates the report also carries the delta (second minus
    /// first). The agency is resolved before any document is touched, so an
    /// unknown slug fails without network access.
    pub async fn analyze(&self, slug: &str, dates: &[NaiveDate]) -> Result<AnalysisReport> {
        if dates.is_empty() || dates.len() > 2 {
            return Err(AppError::validation("analyze requires one or two dates"));
        }
        let agency = self.index.resolve(slug)?;

        let mut reports = Vec::with_capacity(dates.len());
        for &date in dates {
            let assembly = self.assemble(agency, date).await;
            let snapshot = metrics::compute_metrics(&agency.slug, date, &assembly.chapters);
            reports.push(DateReport {
                date,
                metrics: snapshot,
                titles_analyzed: assembly.titles_analyzed,
                chapters: assembly.chapters,
                failures: assembly.failures,
            });
        }

        let delta = match &reports[..] {
            [first, second] => Some(delta::compute_delta(&first.metrics, &second.metrics)?),
            _ => None,
        };

        Ok(AnalysisReport {
            agency: agency.slug.clone(),
            agency_name: agency.label().to_string(),
            dates: reports,
            delta,
        })
    }

    /// Chapter sections for an agency/date, without metrics computation.
    pub async fn chapters(&self, slug: &str, date: NaiveDate) -> Result<DateChapters> {
        let agency = self.index.resolve(slug)?;
        let assembly = self.assemble(agency, date).await;
        Ok(DateChapters {
            date,
            chapters: assembly.chapters,
            failures: assembly.failures,
        })
    }

    /// Direct pass-through to the document cache.
    pub async fn download_title(&self, title: u32, date: NaiveDate) -> Result<Vec<u8>> {
        Ok(self.cache.acquire(title, date).await?.into_bytes())
    }

    /// Acquire and extract every referenced title for one date.
    ///
    /// Titles are fetched concurrently; the joined results are reassembled
    /// in reference order so metrics stay deterministic.
    async fn assemble(&self, agency: &Agency, date: NaiveDate) -> DateAssembly {
        let titles = agency.titles();
        let concurrency = self.config.analysis.max_concurrent.max(1);
        let delay = Duration::from_millis(self.config.analysis.request_delay_ms);

        let mut by_title: HashMap<u32, Vec<ChapterSection>> = HashMap::new();
        let mut failures = Vec::new();

        let mut jobs = stream::iter(titles.iter().copied())
            .map(|title| async move {
                let outcome = self.fetch_and_extract(agency, title, date).await;
                (title, outcome)
            })
            .buffer_unordered(concurrency);

        while let Some((title, outcome)) = jobs.next().await {
            match outcome {
                Ok(sections) => {
                    by_title.insert(title, sections);
                }
                Err(error) => {
                    log::warn!("Skipping title {} for {}: {}", title, date, error);
                    failures.push(TitleFailure::new(title, &error));
                }
            }

            if delay.as_millis() > 0 {
                tokio::time::sleep(delay).await;
            }
        }
        drop(jobs);

        let mut assembly = DateAssembly {
            failures,
            ..DateAssembly::default()
        };
        for title in titles {
            if let Some(sections) = by_title.remove(&title) {
                if !sections.is_empty() {
                    assembly.titles_analyzed.push(title);
                }
                assembly.chapters.extend(sections);
            }
        }
        assembly
    }

    async fn fetch_and_extract(
        &self,
        agency: &Agency,
        title: u32,
        date: NaiveDate,
    ) -> Result<Vec<ChapterSection>> {
        let bytes = self.cache.acquire(title, date).await?.into_bytes();
        let xml = String::from_utf8(bytes).map_err(|e| AppError::malformed(title, e))?;
        services::extract_chapters(&xml, &agency.slug, title, &agency.chapter_filter(title))
    }
}
