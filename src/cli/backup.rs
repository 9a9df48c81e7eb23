use std::path::PathBuf;
use std::time::Duration;

use rusqlite::backup::Backup;

use crate::cli::load::inspect_ledger;
use crate::cli::open_ledger;
use crate::db::ledger_counts;
use crate::error::{PurseError, Result};
use crate::fmt::format_bytes;
use crate::settings::load_settings;

pub fn run(output: Option<String>) -> Result<()> {
    let settings = load_settings();
    let conn = open_ledger(&settings)?;
    let source = ledger_counts(&conn)?;

    let dest_path = match output {
        Some(p) => PathBuf::from(p),
        None => {
            let backups_dir = PathBuf::from(&settings.data_dir).join("backups");
            std::fs::create_dir_all(&backups_dir)?;
            let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            backups_dir.join(format!("purse-{stamp}.db"))
        }
    };

    {
        let mut dest_conn = rusqlite::Connection::open(&dest_path)?;
        let backup = Backup::new(&conn, &mut dest_conn)?;
        backup.run_to_completion(100, Duration::from_millis(10), None)?;
    }

    // The copy must read back as a ledger holding the same rows.
    let copied = inspect_ledger(&dest_path)?;
    if copied != source {
        return Err(PurseError::Other(format!(
            "backup at {} holds {} transactions, expected {}",
            dest_path.display(),
            copied.transactions,
            source.transactions
        )));
    }

    let size = std::fs::metadata(&dest_path)?.len();
    tracing::info!(
        transactions = copied.transactions,
        "backed up ledger to {}",
        dest_path.display()
    );
    println!("Backup saved to {}", dest_path.display());
    println!(
        "  {} categories, {} transactions ({})",
        copied.categories,
        copied.transactions,
        format_bytes(size)
    );
    Ok(())
}
