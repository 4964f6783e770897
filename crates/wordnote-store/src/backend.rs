use std::collections::BTreeMap;

use async_trait::async_trait;
use wordnote_core::{DateKey, VocabEntry, YearMonth};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Persistence medium for vocabulary entries
///
/// Implementations keep each bucket in insertion order. `put` on an existing id
/// overwrites the record in place so its position is preserved.
#[async_trait]
pub trait VocabBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    async fn get(&self, id: &str) -> Result<Option<VocabEntry>, BackendError>;

    async fn list_by_date(&self, date_key: DateKey) -> Result<Vec<VocabEntry>, BackendError>;

    async fn list_all(&self) -> Result<Vec<VocabEntry>, BackendError>;

    async fn put(&self, entry: &VocabEntry) -> Result<(), BackendError>;

    /// Returns whether a record was removed
    async fn delete(&self, id: &str) -> Result<bool, BackendError>;

    /// Delete `stale_ids` and append `entry`
    async fn replace(&self, stale_ids: &[String], entry: &VocabEntry) -> Result<(), BackendError> {
        for id in stale_ids {
            self.delete(id).await?;
        }
        self.put(entry).await
    }

    /// Overwrite the record `old_id` with `entry`, which may carry a new id.
    /// Returns whether `old_id` existed.
    async fn rewrite(&self, old_id: &str, entry: &VocabEntry) -> Result<bool, BackendError> {
        if self.get(old_id).await?.is_none() {
            return Ok(false);
        }
        if old_id != entry.id {
            self.delete(old_id).await?;
        }
        self.put(entry).await?;
        Ok(true)
    }

    /// Entries per day for one month, days without entries omitted
    async fn count_by_month(
        &self,
        month: YearMonth,
    ) -> Result<BTreeMap<DateKey, usize>, BackendError> {
        let mut counts = BTreeMap::new();
        for entry in self.list_all().await? {
            if month.contains(entry.date_key) {
                *counts.entry(entry.date_key).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}
