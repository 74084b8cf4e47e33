//! Persisted devotional records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::digest::content_hash;
use crate::reference::{ReferenceKey, parse_reference};

/// A devotional accepted by the pipeline and ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDevotional {
    pub date: NaiveDate,
    /// Full user-facing message (greeting, body, sign-off).
    pub message: String,
    /// Citation string as extracted from the body.
    pub reference: Option<String>,
    /// Digest of the normalized body, not of the full message.
    pub content_hash: String,
    /// Decomposed reference; `None` when the citation could not be parsed.
    pub key: Option<ReferenceKey>,
}

impl NewDevotional {
    /// Build a record from a normalized body and its rendered message.
    #[must_use]
    pub fn new(date: NaiveDate, body: &str, message: String, reference: Option<String>) -> Self {
        let key = reference.as_deref().and_then(parse_reference);
        Self { date, message, reference, content_hash: content_hash(body), key }
    }
}

/// A stored devotional row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Devotional {
    pub id: i64,
    pub date: NaiveDate,
    pub message: String,
    pub reference: Option<String>,
    pub content_hash: Option<String>,
    pub book: Option<String>,
    pub chapter: Option<u32>,
    pub verse_start: Option<u32>,
    pub verse_end: Option<u32>,
}

impl Devotional {
    /// The decomposed reference, when every column is present.
    #[must_use]
    pub fn key(&self) -> Option<ReferenceKey> {
        Some(ReferenceKey {
            book: self.book.clone()?,
            chapter: self.chapter?,
            verse_start: self.verse_start?,
            verse_end: self.verse_end?,
        })
    }
}
