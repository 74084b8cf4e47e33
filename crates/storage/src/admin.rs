//! Administrative operations on the store file: timestamped backups and
//! reset to an empty schema.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use rusqlite::{Connection, params};

use crate::error::Result;
use crate::storage::Storage;

fn backup_target(backup_dir: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let target = backup_dir.join(format!("database_backup_{stamp}.db"));
    if !target.exists() {
        return target;
    }
    // Two backups within one second (e.g. `backup` then `reset`).
    (1u32..)
        .map(|n| backup_dir.join(format!("database_backup_{stamp}_{n}.db")))
        .find(|candidate| !candidate.exists())
        .unwrap_or(target)
}

/// Copy the store at `db_path` into `backup_dir` as
/// `database_backup_YYYYmmdd_HHMMSS.db`.
///
/// Uses `VACUUM INTO`, which produces a consistent snapshot even while the
/// source is in WAL mode. Returns `Ok(None)` when there is no store to back up.
///
/// # Errors
/// Returns `StorageError` if the backup directory cannot be created or the
/// snapshot fails.
pub fn backup_database(db_path: &Path, backup_dir: &Path) -> Result<Option<PathBuf>> {
    if !db_path.exists() {
        tracing::warn!(path = %db_path.display(), "no database found, nothing to back up");
        return Ok(None);
    }
    fs::create_dir_all(backup_dir)?;
    let target = backup_target(backup_dir);

    let conn = Connection::open(db_path)?;
    conn.execute("VACUUM INTO ?1", params![target.to_string_lossy().into_owned()])?;
    drop(conn);

    let size = fs::metadata(&target).map(|m| m.len()).unwrap_or(0);
    tracing::info!(path = %target.display(), size_bytes = size, "backup created");
    Ok(Some(target))
}

/// Back up the store, delete it (with its WAL side files) and create an
/// empty one with the full schema.
///
/// Any open [`Storage`] on `db_path` must be dropped before calling this.
/// Returns the backup path, if a store existed.
///
/// # Errors
/// Returns `StorageError` if the backup, the removal or the re-creation fails.
/// The store is left untouched when the backup fails.
pub fn reset_database(db_path: &Path, backup_dir: &Path) -> Result<Option<PathBuf>> {
    let backup = backup_database(db_path, backup_dir)?;

    for suffix in ["", "-wal", "-shm"] {
        let mut file = db_path.as_os_str().to_owned();
        file.push(suffix);
        let file = PathBuf::from(file);
        if file.exists() {
            fs::remove_file(&file)?;
        }
    }

    Storage::new(db_path)?;
    tracing::info!(path = %db_path.display(), "database reset to an empty store");
    Ok(backup)
}
