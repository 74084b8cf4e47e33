//! Migration v2: citation string and content digest

pub(super) const COLUMNS: &[(&str, &str)] = &[("reference", "TEXT"), ("content_hash", "TEXT")];
