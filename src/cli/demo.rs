use chrono::{Datelike, Local, NaiveDate, TimeZone};
use rusqlite::Connection;

use crate::cli::open_ledger;
use crate::error::Result;
use crate::models::{EntryType, NewTransaction};
use crate::registry::resolve_category;
use crate::settings::load_settings;
use crate::store::{LedgerStore, SqliteStore};

const MONTHS: u32 = 3;

struct DemoTxn {
    day: u32,
    category: &'static str,
    description: &'static str,
    amount: f64,
    entry_type: EntryType,
}

const MONTHLY: &[DemoTxn] = &[
    DemoTxn { day: 1, category: "Salary", description: "Monthly salary", amount: 52000.0, entry_type: EntryType::Income },
    DemoTxn { day: 2, category: "Rent", description: "Flat rent", amount: 18000.0, entry_type: EntryType::Expense },
    DemoTxn { day: 6, category: "Groceries", description: "Weekly shop", amount: 2350.75, entry_type: EntryType::Expense },
    DemoTxn { day: 9, category: "Transport", description: "Metro card top-up", amount: 800.0, entry_type: EntryType::Expense },
    DemoTxn { day: 12, category: "Food", description: "Dinner out", amount: 1240.5, entry_type: EntryType::Expense },
    DemoTxn { day: 20, category: "Groceries", description: "Weekly shop", amount: 1985.2, entry_type: EntryType::Expense },
    DemoTxn { day: 25, category: "Utilities", description: "Electricity and internet", amount: 3100.0, entry_type: EntryType::Expense },
];

/// Extras that rotate month to month so the summaries differ.
const ROTATING: &[DemoTxn] = &[
    DemoTxn { day: 15, category: "Freelance", description: "Logo design job", amount: 8500.0, entry_type: EntryType::Income },
    DemoTxn { day: 17, category: "Entertainment", description: "Concert tickets", amount: 3200.0, entry_type: EntryType::Expense },
    DemoTxn { day: 22, category: "Health", description: "Pharmacy", amount: 640.0, entry_type: EntryType::Expense },
];

/// Clamp a day to the last valid day of the given year/month.
fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let last_day = NaiveDate::from_ymd_opt(ny, nm, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28);
    day.min(last_day)
}

/// Demo rows for the last [MONTHS] months up to `today`, as (date, txn) pairs.
fn generate_transactions(today: NaiveDate) -> Vec<(NaiveDate, &'static DemoTxn)> {
    let mut txns = Vec::new();
    for i in 0..MONTHS {
        let target = today - chrono::Months::new(MONTHS - 1 - i);
        let (year, month) = (target.year(), target.month());
        let extra = &ROTATING[i as usize % ROTATING.len()];
        for txn in MONTHLY.iter().chain(std::iter::once(extra)) {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, clamp_day(year, month, txn.day)) else {
                continue;
            };
            if date <= today {
                txns.push((date, txn));
            }
        }
    }
    txns
}

fn insert_demo_data<S: LedgerStore + ?Sized>(store: &S, today: NaiveDate) -> Result<usize> {
    let txns = generate_transactions(today);
    for (date, txn) in &txns {
        let category = resolve_category(store, txn.entry_type, Some(txn.category))?;
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        let timestamp = Local
            .from_local_datetime(&noon)
            .earliest()
            .map(|d| d.timestamp())
            .unwrap_or_else(|| noon.and_utc().timestamp());
        store.insert_transaction(&NewTransaction {
            amount: txn.amount,
            description: txn.description.to_string(),
            category_id: category.id,
            date: timestamp,
            entry_type: txn.entry_type,
        })?;
    }
    Ok(txns.len())
}

/// Insert the demo rows in one SQLite transaction: either all land or none do.
fn load_demo(conn: &mut Connection, today: NaiveDate) -> Result<usize> {
    let tx = conn.transaction()?;
    let count = insert_demo_data(&SqliteStore::new(&tx), today)?;
    tx.commit()?;
    tracing::info!(count, "loaded demo transactions");
    Ok(count)
}

pub fn run() -> Result<()> {
    let mut conn = open_ledger(&load_settings())?;

    if !SqliteStore::new(&conn).transactions_newest_first()?.is_empty() {
        println!("Demo data needs an empty ledger; transactions already exist.");
        return Ok(());
    }

    let count = load_demo(&mut conn, Local::now().date_naive())?;

    println!("Demo data loaded!");
    println!("  Transactions: {count}");
    println!();
    println!("Try these next:");
    println!("  purse summary");
    println!("  purse history");
    println!("  purse category list");
    Ok(())
}
