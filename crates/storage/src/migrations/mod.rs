mod column_helpers;
mod v1;
mod v2;
mod v3;
mod v4;

use column_helpers::add_column_if_not_exists;
use rusqlite::Connection;

pub const SCHEMA_VERSION: i32 = 4;

/// Bring a store of any earlier version up to [`SCHEMA_VERSION`].
///
/// Stores created before the reference columns existed are upgraded in
/// place; column additions are skipped when the column is already there.
pub fn run_migrations(conn: &Connection) -> Result<(), rusqlite::Error> {
    let current_version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!("Database schema version: {} (target: {})", current_version, SCHEMA_VERSION);

    if current_version < 1i32 {
        tracing::info!("Running migration v1: devotionals table");
        conn.execute_batch(v1::SQL)?;
    }

    if current_version < 2i32 {
        tracing::info!("Running migration v2: reference and content_hash columns");
        for (column, col_type) in v2::COLUMNS {
            add_column_if_not_exists(conn, "devotionals", column, col_type)?;
        }
    }

    if current_version < 3i32 {
        tracing::info!("Running migration v3: decomposed reference columns");
        for (column, col_type) in v3::COLUMNS {
            add_column_if_not_exists(conn, "devotionals", column, col_type)?;
        }
    }

    if current_version < 4i32 {
        tracing::info!("Running migration v4: hash uniqueness and book/chapter index");
        conn.execute_batch(v4::SQL)?;
    }

    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
    tracing::info!("Database schema up to date (version {})", SCHEMA_VERSION);

    Ok(())
}
