//! Typed error enum for the storage layer.
//!
//! Callers match on `Duplicate` to treat a uniqueness violation as "already
//! recorded" instead of a failure.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// Unique constraint violation (date or content hash).
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// SQL / connection / busy failure.
    #[error("database error: {0}")]
    Database(#[source] rusqlite::Error),

    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking storage task panicked or was cancelled.
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("migration error: {0}")]
    Migration(String),
}

impl StorageError {
    /// Whether this error is a unique-constraint violation.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Custom `From<rusqlite::Error>` rather than a blanket `#[from]`, so that
/// unique and primary-key violations become `Duplicate`. Other constraint
/// failures (NOT NULL, CHECK) stay `Database`.
impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, msg)
                if matches!(
                    e.extended_code,
                    rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                        | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                ) =>
            {
                Self::Duplicate(msg.clone().unwrap_or_else(|| e.to_string()))
            },
            _ => Self::Database(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
