// src/pipeline/cache.rs

//! Cache-or-fetch document acquisition.
//!
//! Fetch failures are never persisted: a later call retries the network
//! rather than remembering the miss, since the failure may be transient.
//! Concurrent callers for the same key may race to fetch; both write the
//! same immutable content, so the redundant fetch is tolerated.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::error::Result;
use crate::services::TitleSource;
use crate::storage::DocumentStore;

/// Outcome of a successful document acquisition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    /// Served from the local cache, no network access
    Hit(Vec<u8>),
    /// Fetched from upstream and persisted
    Fetched(Vec<u8>),
}

impl Acquisition {
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Hit(bytes) | Self::Fetched(bytes) => bytes,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Hit(bytes) | Self::Fetched(bytes) => bytes,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit(_))
    }
}

/// Read-through cache over a document store and a title source.
pub struct DocumentCache {
    store: Arc<dyn DocumentStore>,
    source: Arc<dyn TitleSource>,
}

impl DocumentCache {
    pub fn new(store: Arc<dyn DocumentStore>, source: Arc<dyn TitleSource>) -> Self {
        Self { store, source }
    }

    /// Return the XML for (title, date), fetching only on a cache miss.
    pub async fn acquire(&self, title: u32, date: NaiveDate) -> Result<Acquisition> {
        if let Some(bytes) = self.store.read_title(title, date).await? {
            log::debug!("Cache hit for title {} on {}", title, date);
            return Ok(Acquisition::Hit(bytes));
        }

        let bytes = self.source.fetch_title(title, date).await?;
        self.store.write_title(title, date, &bytes).await?;
        Ok(Acquisition::Fetched(bytes))
    }
}
