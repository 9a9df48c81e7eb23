use std::collections::HashMap;

use chrono::{Local, TimeZone};
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_ledger;
use crate::error::Result;
use crate::fmt::money;
use crate::models::EntryType;
use crate::settings::load_settings;
use crate::store::{LedgerStore, SqliteStore};

pub fn run(entry_type: Option<EntryType>, limit: Option<usize>) -> Result<()> {
    let settings = load_settings();
    let conn = open_ledger(&settings)?;
    let store = SqliteStore::new(&conn);

    let mut names: HashMap<i64, String> = HashMap::new();
    for t in [EntryType::Expense, EntryType::Income] {
        names.extend(store.categories_by_type(t)?.into_iter().map(|c| (c.id, c.name)));
    }

    let rows: Vec<_> = store
        .transactions_newest_first()?
        .into_iter()
        .filter(|t| entry_type.map_or(true, |want| t.entry_type == want))
        .take(limit.unwrap_or(usize::MAX))
        .collect();

    if rows.is_empty() {
        println!("No transactions recorded yet.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Type", "Category", "Description", "Amount"]);
    for t in rows {
        let date = Local
            .timestamp_opt(t.date, 0)
            .single()
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let amount = money(t.amount, &settings.currency_symbol);
        let amount = match t.entry_type {
            EntryType::Income => amount.green(),
            EntryType::Expense => amount.red(),
        };
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(date),
            Cell::new(t.entry_type),
            Cell::new(names.get(&t.category_id).map(String::as_str).unwrap_or("?")),
            Cell::new(t.description),
            Cell::new(amount),
        ]);
    }
    println!("Transactions\n{table}");
    Ok(())
}
