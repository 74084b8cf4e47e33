use async_trait::async_trait;
use chrono::NaiveDate;
use devotional_core::{NewDevotional, VerseRange};

use crate::error::StorageError;

/// History lookups and the single write the daily job performs.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Whether a devotional is already recorded for `date`.
    async fn already_sent(&self, date: NaiveDate) -> Result<bool, StorageError>;

    /// Stored verse ranges for `book` + `chapter`.
    async fn verse_ranges(&self, book: &str, chapter: u32)
    -> Result<Vec<VerseRange>, StorageError>;

    /// Whether `hash` has been stored before.
    async fn hash_used(&self, hash: &str) -> Result<bool, StorageError>;

    /// Insert; `Ok(false)` when the date or hash is already recorded.
    async fn save_devotional(&self, record: &NewDevotional) -> Result<bool, StorageError>;
}
