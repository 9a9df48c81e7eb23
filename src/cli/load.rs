use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::db::{has_ledger_schema, ledger_counts, LedgerCounts, DB_FILE};
use crate::error::{PurseError, Result};
use crate::settings::{load_settings, save_settings, shellexpand_path};

/// Read the row counts of the ledger at `db_path`, failing when the file is
/// not a purse database. Only queries are run against the file.
pub(crate) fn inspect_ledger(db_path: &Path) -> Result<LedgerCounts> {
    let not_a_ledger = || {
        PurseError::Settings(format!("{} is not a purse ledger", db_path.display()))
    };
    let conn = Connection::open(db_path)?;
    match has_ledger_schema(&conn) {
        Ok(true) => ledger_counts(&conn),
        Ok(false) => Err(not_a_ledger()),
        Err(e) => {
            tracing::debug!("schema check failed for {}: {e}", db_path.display());
            Err(not_a_ledger())
        }
    }
}

pub fn run(path: &str) -> Result<()> {
    let resolved = PathBuf::from(shellexpand_path(path));
    let db_path = resolved.join(DB_FILE);

    if !db_path.exists() {
        return Err(PurseError::Settings(format!(
            "No database found at {}\nRun `purse init --data-dir {}` to create one.",
            db_path.display(),
            resolved.display()
        )));
    }
    let counts = inspect_ledger(&db_path)?;

    let mut settings = load_settings();
    settings.data_dir = resolved.to_string_lossy().to_string();
    save_settings(&settings)?;
    tracing::info!(data_dir = %settings.data_dir, "switched ledger");

    println!("Switched to {}", resolved.display());
    println!(
        "  {} categories, {} transactions",
        counts.categories, counts.transactions
    );
    Ok(())
}
