//! Administrative commands. They only need the data directory, never
//! backend credentials.

use std::io::{self, BufRead as _, Write as _};

use anyhow::{Result, bail};
use devotional_core::DataPaths;
use devotional_service::read_send_status;
use devotional_storage::{Storage, StoreStats, backup_database, reset_database};

fn open_existing(paths: &DataPaths) -> Result<Option<Storage>> {
    let db_path = paths.database();
    if !db_path.exists() {
        return Ok(None);
    }
    Ok(Some(Storage::new(&db_path)?))
}

fn print_table(paths: &DataPaths, stats: &StoreStats) {
    println!("Database: {}", paths.database().display());
    println!("Size: {:.1} KiB", kib(stats.file_size_bytes));
    println!("Devotionals: {}", stats.total);
    if let (Some(first), Some(last)) = (&stats.first_date, &stats.last_date) {
        println!("Period: {first} .. {last}");
    }
    println!(
        "Old Testament: {} ({:.1}%)",
        stats.old_testament,
        stats.percent(stats.old_testament)
    );
    println!(
        "New Testament: {} ({:.1}%)",
        stats.new_testament,
        stats.percent(stats.new_testament)
    );
    if !stats.top_books.is_empty() {
        println!();
        println!("{:<24} {:>6} {:>7}", "Book", "Uses", "Share");
        for entry in &stats.top_books {
            println!(
                "{:<24} {:>6} {:>6.1}%",
                entry.book,
                entry.count,
                stats.percent(entry.count)
            );
        }
    }
}

#[allow(clippy::cast_precision_loss, reason = "file sizes are far below 2^52")]
fn kib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0
}

pub(crate) fn stats(paths: &DataPaths, json: bool) -> Result<()> {
    let stats = match open_existing(paths)? {
        Some(storage) => storage.get_stats()?,
        None => StoreStats::default(),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print_table(paths, &stats);
    }
    Ok(())
}

pub(crate) fn backup(paths: &DataPaths) -> Result<()> {
    match backup_database(&paths.database(), &paths.backups())? {
        Some(path) => println!("Backup written to {}", path.display()),
        None => println!("No database at {}, nothing to back up.", paths.database().display()),
    }
    Ok(())
}

pub(crate) fn reset(paths: &DataPaths, force: bool) -> Result<()> {
    if let Some(storage) = open_existing(paths)? {
        print_table(paths, &storage.get_stats()?);
        // The pool keeps connections open; they must be gone before the
        // files are removed.
        drop(storage);
    }

    if !force {
        print!("This deletes the devotional history. Type CONFIRM to continue: ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if answer.trim() != "CONFIRM" {
            bail!("reset cancelled");
        }
    }

    match reset_database(&paths.database(), &paths.backups())? {
        Some(backup) => println!("Previous database saved to {}", backup.display()),
        None => println!("No previous database found."),
    }
    println!("Database reset: {}", paths.database().display());
    Ok(())
}

pub(crate) async fn status(paths: &DataPaths) -> Result<()> {
    let path = paths.send_status();
    let Some(status) = read_send_status(&path).await? else {
        println!("No delivery status at {}", path.display());
        return Ok(());
    };
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
