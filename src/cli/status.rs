use crate::db::{get_connection, ledger_counts};
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let db_path = settings.db_path();

    println!("Data dir:   {}", settings.data_dir);
    println!("Database:   {}", db_path.display());
    println!("Currency:   {}", settings.currency_symbol);

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = get_connection(&db_path)?;
        let counts = ledger_counts(&conn)?;

        println!();
        println!("Categories:    {}", counts.categories);
        println!("Transactions:  {}", counts.transactions);
    } else {
        println!();
        println!("Database not found. Run `purse init` to set up.");
    }

    Ok(())
}
