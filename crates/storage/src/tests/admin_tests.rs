use tempfile::TempDir;

use super::{create_test_devotional, create_test_storage, day};
use crate::{Storage, backup_database, reset_database};

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn stats_on_empty_store() {
    let (storage, _dir) = create_test_storage();
    let stats = storage.get_stats().unwrap();
    assert_eq!(stats.total, 0);
    assert!(stats.first_date.is_none());
    assert!(stats.top_books.is_empty());
    assert!((stats.percent(0) - 0.0).abs() < f64::EPSILON);
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn stats_counts_books_and_testaments() {
    let (storage, _dir) = create_test_storage();
    storage.save_devotional(&create_test_devotional(1, "a", "Salmos 23:1 (NVI)")).unwrap();
    storage.save_devotional(&create_test_devotional(2, "b", "Salmos 91:1-2 (NVI)")).unwrap();
    storage.save_devotional(&create_test_devotional(3, "c", "João 3:16 (NVI)")).unwrap();
    storage.save_devotional(&create_test_devotional(4, "d", "sem referência")).unwrap();

    let stats = storage.get_stats().unwrap();
    assert_eq!(stats.total, 4);
    assert_eq!(stats.first_date.as_deref(), Some("2025-01-01"));
    assert_eq!(stats.last_date.as_deref(), Some("2025-01-04"));
    assert_eq!(stats.top_books[0].book, "Salmos");
    assert_eq!(stats.top_books[0].count, 2);
    assert_eq!(stats.top_books.len(), 2);
    assert_eq!(stats.old_testament, 2);
    assert_eq!(stats.new_testament, 1);
    assert!((stats.percent(stats.old_testament) - 50.0).abs() < 1e-9);
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn backup_copies_rows_into_timestamped_file() {
    let (storage, dir) = create_test_storage();
    storage.save_devotional(&create_test_devotional(1, "a", "Salmos 23:1 (NVI)")).unwrap();
    let backups = dir.path().join("backups");

    let path = backup_database(storage.path(), &backups).unwrap().unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("database_backup_"), "{name}");
    assert!(name.ends_with(".db"), "{name}");

    let copy = Storage::new(&path).unwrap();
    assert!(copy.already_sent(day(1)).unwrap());

    let second = backup_database(storage.path(), &backups).unwrap().unwrap();
    assert_ne!(second, path);
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn backup_of_missing_store_is_none() {
    let dir = TempDir::new().unwrap();
    let result = backup_database(&dir.path().join("absent.db"), &dir.path().join("backups"));
    assert!(result.unwrap().is_none());
    assert!(!dir.path().join("backups").exists());
}

#[test]
#[expect(clippy::unwrap_used, reason = "test code")]
fn reset_backs_up_then_empties() {
    let (storage, dir) = create_test_storage();
    storage.save_devotional(&create_test_devotional(1, "a", "Salmos 23:1 (NVI)")).unwrap();
    let db_path = storage.path().to_path_buf();
    drop(storage);

    let backup = reset_database(&db_path, &dir.path().join("backups")).unwrap().unwrap();
    assert!(backup.exists());

    let fresh = Storage::new(&db_path).unwrap();
    assert_eq!(fresh.get_stats().unwrap().total, 0);
    assert!(fresh.save_devotional(&create_test_devotional(1, "a", "Salmos 23:1 (NVI)")).unwrap());

    let restored = Storage::new(&backup).unwrap();
    assert_eq!(restored.get_stats().unwrap().total, 1);
}
