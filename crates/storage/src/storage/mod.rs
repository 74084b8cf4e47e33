//! `SQLite` storage implementation.
//!
//! All methods are synchronous; the async [`crate::HistoryStore`] impl in
//! `backend.rs` moves them onto the blocking pool.

mod backend;
mod devotionals;
mod stats;

use std::path::{Path, PathBuf};

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::error::{Result, StorageError};
use crate::migrations;

pub use stats::{BookCount, StoreStats};

/// Type alias for pooled connection
pub(crate) type PooledConn = PooledConnection<SqliteConnectionManager>;

/// One invocation uses a single worker; a few connections cover the async
/// bridge and admin reads.
const POOL_SIZE: u32 = 4;

/// Main storage struct wrapping `SQLite` connection pool
#[derive(Clone, Debug)]
pub struct Storage {
    pub(crate) pool: Pool<SqliteConnectionManager>,
    path: PathBuf,
}

/// Get a connection from the pool
pub(crate) fn get_conn(pool: &Pool<SqliteConnectionManager>) -> Result<PooledConn> {
    Ok(pool.get()?)
}

/// Log row read errors and filter them out
pub(crate) fn log_row_error<T>(result: rusqlite::Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!("Row read error: {}", e);
            None
        },
    }
}

/// Concurrency settings applied to every pooled connection
fn init_connection(conn: &mut Connection) -> std::result::Result<(), rusqlite::Error> {
    conn.execute_batch(
        "PRAGMA busy_timeout = 30000;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;",
    )?;
    Ok(())
}

impl Storage {
    /// Open (creating if needed) the store at `db_path` and migrate it to the
    /// current schema.
    ///
    /// # Errors
    /// Returns `StorageError` if the directory cannot be created, the pool
    /// cannot connect, or a migration fails.
    pub fn new(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);
        let pool = Pool::builder().max_size(POOL_SIZE).build(manager)?;

        let conn = pool.get()?;
        migrations::run_migrations(&conn).map_err(|e| StorageError::Migration(e.to_string()))?;
        drop(conn);

        tracing::info!(path = %db_path.display(), pool_size = POOL_SIZE, "Storage initialized");

        Ok(Self { pool, path: db_path.to_path_buf() })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
