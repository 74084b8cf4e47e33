use devotional_core::Testament;
use serde::Serialize;

use super::{Storage, get_conn, log_row_error};
use crate::error::Result;

/// How often a book has been used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookCount {
    pub book: String,
    pub count: u64,
}

/// Summary of the history store, as shown before a reset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total: u64,
    pub first_date: Option<String>,
    pub last_date: Option<String>,
    /// Ten most used books, most frequent first.
    pub top_books: Vec<BookCount>,
    pub old_testament: u64,
    /// Rows with a decomposed book that is not on the Old Testament list.
    pub new_testament: u64,
    pub file_size_bytes: u64,
}

impl StoreStats {
    /// Share of `count` in all records, in percent.
    #[must_use]
    pub fn percent(&self, count: u64) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss, reason = "row counts are far below 2^52")]
        let share = count as f64 / self.total as f64;
        share * 100.0
    }
}

fn to_count(n: i64) -> u64 {
    u64::try_from(n).unwrap_or(0)
}

impl Storage {
    /// Get storage statistics.
    ///
    /// # Errors
    /// Returns error if database query fails.
    pub fn get_stats(&self) -> Result<StoreStats> {
        let conn = get_conn(&self.pool)?;
        let total: i64 = conn.query_row("SELECT COUNT(*) FROM devotionals", [], |row| row.get(0))?;
        let (first_date, last_date): (Option<String>, Option<String>) =
            conn.query_row("SELECT MIN(date), MAX(date) FROM devotionals", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?;

        let mut stmt = conn.prepare(
            "SELECT book, COUNT(*) AS uses FROM devotionals
             WHERE book IS NOT NULL
             GROUP BY book
             ORDER BY uses DESC, book ASC
             LIMIT 10",
        )?;
        let top_books = stmt
            .query_map([], |row| {
                Ok(BookCount { book: row.get(0)?, count: to_count(row.get(1)?) })
            })?
            .filter_map(log_row_error)
            .collect();

        let mut stmt = conn.prepare("SELECT book FROM devotionals WHERE book IS NOT NULL")?;
        let books: Vec<String> =
            stmt.query_map([], |row| row.get(0))?.filter_map(log_row_error).collect();
        let old_testament = books
            .iter()
            .filter(|book| Testament::of_book(book) == Testament::Old)
            .count();
        let old_testament = u64::try_from(old_testament).unwrap_or(0);
        let with_book = u64::try_from(books.len()).unwrap_or(0);

        let file_size_bytes = std::fs::metadata(self.path()).map(|m| m.len()).unwrap_or(0);

        Ok(StoreStats {
            total: to_count(total),
            first_date,
            last_date,
            top_books,
            old_testament,
            new_testament: with_book.saturating_sub(old_testament),
            file_size_bytes,
        })
    }
}
