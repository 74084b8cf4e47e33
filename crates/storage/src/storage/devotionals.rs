use chrono::NaiveDate;
use devotional_core::{Devotional, NewDevotional, VerseRange};
use rusqlite::types::Type;
use rusqlite::{OptionalExtension as _, params};

use super::{Storage, get_conn, log_row_error};
use crate::error::{Result, StorageError};

const DEVOTIONAL_COLUMNS: &str =
    "id, date, message, reference, content_hash, book, chapter, verse_start, verse_end";

fn map_devotional(row: &rusqlite::Row<'_>) -> rusqlite::Result<Devotional> {
    let date: String = row.get(1)?;
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    Ok(Devotional {
        id: row.get(0)?,
        date,
        message: row.get(2)?,
        reference: row.get(3)?,
        content_hash: row.get(4)?,
        book: row.get(5)?,
        chapter: row.get(6)?,
        verse_start: row.get(7)?,
        verse_end: row.get(8)?,
    })
}

impl Storage {
    /// Whether a devotional is already stored for `date`.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn already_sent(&self, date: NaiveDate) -> Result<bool> {
        let conn = get_conn(&self.pool)?;
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM devotionals WHERE date = ?1",
                params![date.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Stored verse ranges for one book and chapter. Bounds may be NULL on
    /// rows written before the decomposed columns existed.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn verse_ranges(&self, book: &str, chapter: u32) -> Result<Vec<VerseRange>> {
        let conn = get_conn(&self.pool)?;
        let mut stmt = conn.prepare(
            "SELECT verse_start, verse_end FROM devotionals WHERE book = ?1 AND chapter = ?2",
        )?;
        let ranges = stmt
            .query_map(params![book, chapter], |row| {
                Ok(VerseRange { start: row.get(0)?, end: row.get(1)? })
            })?
            .filter_map(log_row_error)
            .collect();
        Ok(ranges)
    }

    /// Whether any stored devotional carries `hash`.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn hash_used(&self, hash: &str) -> Result<bool> {
        let conn = get_conn(&self.pool)?;
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM devotionals WHERE content_hash = ?1 LIMIT 1",
                params![hash],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Insert a devotional. Returns `Ok(false)` when the date or content hash
    /// is already recorded.
    ///
    /// # Errors
    /// Returns error for database failures other than a uniqueness violation.
    pub fn save_devotional(&self, record: &NewDevotional) -> Result<bool> {
        if record.key.is_none() {
            tracing::warn!(
                reference = record.reference.as_deref().unwrap_or(""),
                "reference could not be decomposed, storing without book/chapter/verses"
            );
        }
        let key = record.key.as_ref();
        let conn = get_conn(&self.pool)?;
        let result = conn.execute(
            "INSERT INTO devotionals
               (date, message, reference, content_hash, book, chapter, verse_start, verse_end)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                record.date.to_string(),
                record.message,
                record.reference,
                record.content_hash,
                key.map(|k| k.book.as_str()),
                key.map(|k| k.chapter),
                key.map(|k| k.verse_start),
                key.map(|k| k.verse_end),
            ],
        );
        match result.map_err(StorageError::from) {
            Ok(_) => {
                tracing::info!(date = %record.date, hash = %record.content_hash, "devotional stored");
                Ok(true)
            },
            Err(e) if e.is_duplicate() => {
                tracing::info!(date = %record.date, error = %e, "devotional already recorded");
                Ok(false)
            },
            Err(e) => Err(e),
        }
    }

    /// Devotional stored for `date`, if any.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_by_date(&self, date: NaiveDate) -> Result<Option<Devotional>> {
        let conn = get_conn(&self.pool)?;
        let sql = format!("SELECT {DEVOTIONAL_COLUMNS} FROM devotionals WHERE date = ?1");
        Ok(conn.query_row(&sql, params![date.to_string()], map_devotional).optional()?)
    }
}
