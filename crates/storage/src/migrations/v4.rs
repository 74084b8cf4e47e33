//! Migration v4: unique content hash, book/chapter lookup index

pub(super) const SQL: &str = "
CREATE UNIQUE INDEX IF NOT EXISTS idx_devotionals_hash_unique ON devotionals(content_hash);
CREATE INDEX IF NOT EXISTS idx_devotionals_book_chapter ON devotionals(book, chapter);
";
