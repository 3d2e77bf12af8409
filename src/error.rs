// src/error.rs

//! Unified error handling for the analyzer.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for analyzer operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Agency identifier not present in the reference table
    #[error("unknown agency: {0}")]
    UnknownAgency(String),

    /// Upstream has no document for this title/date (not retryable)
    #[error("no document upstream for title {title} on {date}")]
    DocumentNotFound { title: u32, date: NaiveDate },

    /// Transient upstream/network failure (caller may retry)
    #[error("fetch unavailable for title {title} on {date}: {message}")]
    FetchUnavailable {
        title: u32,
        date: NaiveDate,
        message: String,
    },

    /// Title XML failed to parse
    #[error("malformed document for title {title}: {message}")]
    MalformedDocument { title: u32, message: String },

    /// Metrics for two different agencies were compared
    #[error("agency mismatch: {left} vs {right}")]
    AgencyMismatch { left: String, right: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a transient fetch error for a title/date.
    pub fn fetch_unavailable(
        title: u32,
        date: NaiveDate,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::FetchUnavailable {
            title,
            date,
            message: message.to_string(),
        }
    }

    /// Create a malformed-document error for a title.
    pub fn malformed(title: u32, message: impl std::fmt::Display) -> Self {
        Self::MalformedDocument {
            title,
            message: message.to_string(),
        }
    }

    /// Whether the caller may reasonably retry the failed operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::FetchUnavailable { .. })
    }
}
