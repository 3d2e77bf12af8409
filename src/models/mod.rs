// src/models/mod.rs

//! Domain models for the analyzer.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod agency;
mod config;
mod metrics;
mod report;
mod section;

// Re-export all public types
pub use agency::{Agency, AgencyIndex, AgencySummary, CfrReference, ChapterFilter};
pub use config::{AnalysisConfig, ApiConfig, CacheConfig, Config};
pub use metrics::{Delta, Metrics};
pub use report::{AnalysisReport, DateChapters, DateReport, TitleFailure};
pub use section::ChapterSection;
