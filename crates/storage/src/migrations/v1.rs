//! Migration v1: devotionals table, one row per calendar date

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS devotionals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL UNIQUE,
    message TEXT NOT NULL
);
";
