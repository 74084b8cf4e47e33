//! Migration v3: decomposed reference columns for overlap lookups

pub(super) const COLUMNS: &[(&str, &str)] = &[
    ("book", "TEXT"),
    ("chapter", "INTEGER"),
    ("verse_start", "INTEGER"),
    ("verse_end", "INTEGER"),
];
