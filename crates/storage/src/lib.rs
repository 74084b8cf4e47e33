//! Storage layer for the devotional job
//!
//! SQLite history of delivered devotionals, one row per calendar date, with
//! the content hash and decomposed reference used for dedup.

mod admin;
mod error;
mod migrations;
mod storage;
#[cfg(test)]
mod tests;
mod traits;

pub use admin::{backup_database, reset_database};
pub use error::{Result, StorageError};
pub use storage::{BookCount, Storage, StoreStats};
pub use traits::HistoryStore;
