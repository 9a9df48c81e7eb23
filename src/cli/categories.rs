use comfy_table::{Cell, Table};

use crate::cli::open_ledger;
use crate::error::Result;
use crate::models::EntryType;
use crate::registry::{register_category, CategoryOutcome};
use crate::settings::load_settings;
use crate::store::{LedgerStore, SqliteStore};

pub fn add(name: &str, entry_type: EntryType) -> Result<()> {
    let conn = open_ledger(&load_settings())?;
    let store = SqliteStore::new(&conn);
    match register_category(&store, name, entry_type)? {
        CategoryOutcome::Created(cat) => println!("Added {} category: {}", cat.entry_type, cat.name),
        CategoryOutcome::Duplicate => println!("Category name already exists"),
    }
    Ok(())
}

pub fn list(entry_type: Option<EntryType>) -> Result<()> {
    let conn = open_ledger(&load_settings())?;
    let store = SqliteStore::new(&conn);
    let types = match entry_type {
        Some(t) => vec![t],
        None => vec![EntryType::Expense, EntryType::Income],
    };

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Type"]);
    for t in types {
        for cat in store.categories_by_type(t)? {
            table.add_row(vec![
                Cell::new(cat.id),
                Cell::new(cat.name),
                Cell::new(cat.entry_type),
            ]);
        }
    }
    println!("Categories\n{table}");
    Ok(())
}
