//! Test utilities and module declarations for storage tests.

use chrono::NaiveDate;
use devotional_core::NewDevotional;
use tempfile::TempDir;

use crate::Storage;

mod admin_tests;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
}

/// A record for day `d` whose body is unique to `body`.
pub fn create_test_devotional(d: u32, body: &str, reference: &str) -> NewDevotional {
    NewDevotional::new(day(d), body, format!("Olá!\n\n{body}\n\nAmém."), Some(reference.to_owned()))
}
