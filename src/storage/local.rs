//! Local filesystem document cache.
//!
//! Writes are atomic (temp file then rename) so a crashed or racing writer
//! never leaves a torn document at a cache key.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::DocumentStore;

const AGENCIES_FILE: &str = "agencies.json";

/// Local filesystem cache backend.
#[derive(Debug, Clone)]
pub struct LocalStore {
    root_dir: PathBuf,
}

impl LocalStore {
    /// Create a new LocalStore rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Deterministic cache key for a title/date pair.
    pub fn title_key(title: u32, date: NaiveDate) -> String {
        format!("title_{}_{}.xml", title, date.format("%Y-%m-%d"))
    }

    /// Get the full path for a relative key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    /// Read bytes, returning None if the file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl DocumentStore for LocalStore {
    async fn read_title(&self, title: u32, date: NaiveDate) -> Result<Option<Vec<u8>>> {
        self.read_bytes(&Self::title_key(title, date)).await
    }

    async fn write_title(&self, title: u32, date: NaiveDate, bytes: &[u8]) -> Result<()> {
        self.write_bytes(&Self::title_key(title, date), bytes).await
    }

    async fn read_agencies(&self) -> Result<Option<Vec<u8>>> {
        self.read_bytes(AGENCIES_FILE).await
    }

    async fn write_agencies(&self, bytes: &[u8]) -> Result<()> {
        self.write_bytes(AGENCIES_FILE, bytes).await
    }
}
