//! Storage abstractions for the document cache.
//!
//! The cache is an append-only key-to-bytes store on durable local storage,
//! keyed deterministically by (title, date). Documents are immutable once
//! written; there is no expiry policy.
//!
//! ## Directory Structure
//!
//! ```text
//! data/
//! ├── config.toml              # Analyzer configuration
//! ├── agencies.json            # Agency reference table
//! ├── title_12_2024-07-01.xml  # Cached title documents
//! └── title_40_2024-07-01.xml
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::Result;

// Re-export for convenience
pub use local::LocalStore;

/// Trait for document cache backends.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a cached title document, `None` if absent.
    async fn read_title(&self, title: u32, date: NaiveDate) -> Result<Option<Vec<u8>>>;

    /// Persist a title document at its deterministic key.
    ///
    /// Writes must be idempotent: two racing writers for the same key both
    /// write the same content, so last-write-wins is safe.
    async fn write_title(&self, title: u32, date: NaiveDate, bytes: &[u8]) -> Result<()>;

    /// Read the cached agency reference table, `None` if absent.
    async fn read_agencies(&self) -> Result<Option<Vec<u8>>>;

    /// Persist the agency reference table.
    async fn write_agencies(&self, bytes: &[u8]) -> Result<()>;
}
