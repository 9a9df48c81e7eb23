use chrono::Local;
use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cli::open_ledger;
use crate::error::Result;
use crate::fmt::money;
use crate::settings::load_settings;
use crate::store::SqliteStore;
use crate::summary::monthly_summaries;

pub const NO_HISTORY: &str = "There is presently no history available.";

pub fn run() -> Result<()> {
    let settings = load_settings();
    let conn = open_ledger(&settings)?;
    let store = SqliteStore::new(&conn);
    let summaries = monthly_summaries(&store, &Local)?;

    if summaries.is_empty() {
        println!("{NO_HISTORY}");
        return Ok(());
    }

    let symbol = &settings.currency_symbol;
    let mut table = Table::new();
    table.set_header(vec!["Month", "Income", "Expenses", "Savings"]);
    for s in &summaries {
        let savings = s.savings();
        let savings_text = if savings < 0.0 {
            money(savings, symbol).red().bold()
        } else {
            money(savings, symbol).green().bold()
        };
        table.add_row(vec![
            Cell::new(&s.bucket.label),
            Cell::new(money(s.totals.income, symbol)),
            Cell::new(money(s.totals.expenses, symbol)),
            Cell::new(savings_text),
        ]);
    }
    println!("Monthly Summary\n{table}");
    Ok(())
}
