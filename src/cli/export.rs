use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::cli::open_ledger;
use crate::error::Result;
use crate::models::EntryType;
use crate::settings::load_settings;
use crate::store::{LedgerStore, SqliteStore};

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: i64,
    date: String,
    timestamp: i64,
    #[serde(rename = "type")]
    entry_type: &'static str,
    category: &'a str,
    description: &'a str,
    amount: f64,
}

pub fn run(output: Option<String>) -> Result<()> {
    let settings = load_settings();
    let conn = open_ledger(&settings)?;
    let store = SqliteStore::new(&conn);

    let path = match output {
        Some(p) => PathBuf::from(p),
        None => {
            let date = Local::now().format("%Y-%m-%d");
            PathBuf::from(&settings.data_dir)
                .join("exports")
                .join(format!("transactions-{date}.csv"))
        }
    };

    let count = write_csv(&store, &path)?;
    println!("Wrote {count} transactions to {}", path.display());
    Ok(())
}

/// Write every transaction, newest first, to `path`. Returns the row count.
pub fn write_csv<S: LedgerStore + ?Sized>(store: &S, path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut names: HashMap<i64, String> = HashMap::new();
    for t in [EntryType::Expense, EntryType::Income] {
        names.extend(store.categories_by_type(t)?.into_iter().map(|c| (c.id, c.name)));
    }

    let transactions = store.transactions_newest_first()?;
    let mut writer = csv::Writer::from_path(path)?;
    for t in &transactions {
        let date = Local
            .timestamp_opt(t.date, 0)
            .single()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();
        writer.serialize(ExportRow {
            id: t.id,
            date,
            timestamp: t.date,
            entry_type: t.entry_type.as_str(),
            category: names.get(&t.category_id).map(String::as_str).unwrap_or(""),
            description: &t.description,
            amount: t.amount,
        })?;
    }
    writer.flush()?;
    tracing::info!(rows = transactions.len(), "exported transactions to {}", path.display());
    Ok(transactions.len())
}
