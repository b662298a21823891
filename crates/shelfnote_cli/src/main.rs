//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `shelfnote_core` wiring against a real SQLite slot database.
//! - Print one deterministic summary line per list variant.
//!
//! Usage: `shelfnote_cli [db_path] [log_dir]`. Without `db_path` an
//! in-memory database is used; without `log_dir` logging stays off.
//! The database is only read: no preset seeds its slot here.

use log::info;
use shelfnote_core::db::{open_db, open_db_in_memory};
use shelfnote_core::{
    default_log_level, init_logging, CollectionStats, ItemStore, SqliteKvStorage, StoreConfig,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let db_path = args.next();
    let log_dir = args.next();

    match run(db_path, log_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("shelfnote_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(db_path: Option<String>, log_dir: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = log_dir {
        init_logging(default_log_level(), &dir)?;
    }

    let conn = match db_path {
        Some(path) => open_db(path)?,
        None => open_db_in_memory()?,
    };
    let storage = SqliteKvStorage::try_new(&conn)?;

    println!("shelfnote_core version={}", shelfnote_core::core_version());
    for line in summarize(&storage) {
        println!("{line}");
    }

    info!("event=cli_smoke module=cli status=ok");
    Ok(())
}

/// Opens every preset read-only and renders one counters line per slot.
fn summarize(storage: &SqliteKvStorage<'_>) -> Vec<String> {
    [
        StoreConfig::course_tasks(),
        StoreConfig::dashboard_tasks(),
        StoreConfig::bookshelf(),
    ]
    .into_iter()
    .map(|config| {
        let store = ItemStore::open(storage, config.with_seed(Vec::new()));
        let stats = CollectionStats::from_items(store.items());
        format!(
            "slot={} total={} completed={} pending={} own={} reading={} to_buy={}",
            store.config().storage_key(),
            stats.total,
            stats.completed,
            stats.pending,
            stats.own,
            stats.reading,
            stats.to_buy
        )
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::summarize;
    use shelfnote_core::db::open_db_in_memory;
    use shelfnote_core::SqliteKvStorage;

    #[test]
    fn summary_leaves_fresh_database_untouched() {
        let conn = open_db_in_memory().unwrap();
        let storage = SqliteKvStorage::try_new(&conn).unwrap();

        let lines = summarize(&storage);

        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("slot=books total=0 "));
        assert!(storage.keys().unwrap().is_empty());
    }
}
