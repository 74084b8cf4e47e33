use async_trait::async_trait;
use chrono::NaiveDate;
use devotional_core::{NewDevotional, VerseRange};

use super::Storage;
use crate::error::StorageError;
use crate::traits::HistoryStore;

#[async_trait]
impl HistoryStore for Storage {
    async fn already_sent(&self, date: NaiveDate) -> Result<bool, StorageError> {
        let storage = self.clone();
        tokio::task::spawn_blocking(move || storage.already_sent(date)).await?
    }

    async fn verse_ranges(
        &self,
        book: &str,
        chapter: u32,
    ) -> Result<Vec<VerseRange>, StorageError> {
        let storage = self.clone();
        let book = book.to_owned();
        tokio::task::spawn_blocking(move || storage.verse_ranges(&book, chapter)).await?
    }

    async fn hash_used(&self, hash: &str) -> Result<bool, StorageError> {
        let storage = self.clone();
        let hash = hash.to_owned();
        tokio::task::spawn_blocking(move || storage.hash_used(&hash)).await?
    }

    async fn save_devotional(&self, record: &NewDevotional) -> Result<bool, StorageError> {
        let storage = self.clone();
        let record = record.clone();
        tokio::task::spawn_blocking(move || storage.save_devotional(&record)).await?
    }
}
