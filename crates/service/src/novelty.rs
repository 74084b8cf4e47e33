//! Read-only pre-insert checks against history. Storage uniqueness is the
//! final authority; these only keep the job from persisting a repeat.

use devotional_core::parse_reference;
use devotional_storage::{HistoryStore, StorageError};

/// Whether `reference` shares a verse with a stored devotional in the same
/// book and chapter. An unparseable reference never overlaps.
pub async fn overlaps_history<S>(store: &S, reference: &str) -> Result<bool, StorageError>
where
    S: HistoryStore + ?Sized,
{
    let Some(key) = parse_reference(reference) else {
        tracing::warn!(reference, "reference not parseable, skipping overlap check");
        return Ok(false);
    };
    let stored = store.verse_ranges(&key.book, key.chapter).await?;
    let overlaps = key.overlaps_any(&stored);
    if overlaps {
        tracing::debug!(reference = %key, stored = stored.len(), "verse range already used");
    }
    Ok(overlaps)
}

/// Whether a devotional with this content hash is already stored.
pub async fn hash_repeated<S>(store: &S, hash: &str) -> Result<bool, StorageError>
where
    S: HistoryStore + ?Sized,
{
    store.hash_used(hash).await
}
