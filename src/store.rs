//! The ledger store: everything the rest of the crate needs from the database.

use rusqlite::{params, Connection, Row};

use crate::error::Result;
use crate::models::{Category, EntryType, NewTransaction, Totals, Transaction};

/// Reads and writes categories and transactions.
///
/// The aggregation and registration code only talk to this trait, so they can
/// be exercised against an in-memory fake as well as [SqliteStore].
pub trait LedgerStore {
    /// Insert a category and return it with its store-assigned ID.
    fn insert_category(&self, name: &str, entry_type: EntryType) -> Result<Category>;

    /// All categories of one type, oldest first.
    fn categories_by_type(&self, entry_type: EntryType) -> Result<Vec<Category>>;

    /// Insert a transaction and return it with its store-assigned ID.
    fn insert_transaction(&self, new: &NewTransaction) -> Result<Transaction>;

    /// All transactions ordered by date, newest first.
    fn transactions_newest_first(&self) -> Result<Vec<Transaction>>;

    /// Summed income and expenses for transactions dated in `[start, end]`.
    fn totals_between(&self, start: i64, end: i64) -> Result<Totals>;
}

pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

fn map_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        entry_type: row.get(2)?,
    })
}

fn map_transaction(row: &Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        description: row.get(2)?,
        category_id: row.get(3)?,
        date: row.get(4)?,
        entry_type: row.get(5)?,
    })
}

impl LedgerStore for SqliteStore<'_> {
    fn insert_category(&self, name: &str, entry_type: EntryType) -> Result<Category> {
        self.conn.execute(
            "INSERT INTO categories (name, type) VALUES (?1, ?2)",
            params![name, entry_type],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, name, %entry_type, "inserted category");
        Ok(Category {
            id,
            name: name.to_string(),
            entry_type,
        })
    }

    fn categories_by_type(&self, entry_type: EntryType) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, type FROM categories WHERE type = ?1 ORDER BY id")?;
        let categories = stmt
            .query_map([entry_type], map_category)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    fn insert_transaction(&self, new: &NewTransaction) -> Result<Transaction> {
        self.conn.execute(
            "INSERT INTO transactions (amount, description, category_id, date, type) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![new.amount, new.description, new.category_id, new.date, new.entry_type],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, amount = new.amount, date = new.date, "inserted transaction");
        Ok(Transaction {
            id,
            amount: new.amount,
            description: new.description.clone(),
            category_id: new.category_id,
            date: new.date,
            entry_type: new.entry_type,
        })
    }

    fn transactions_newest_first(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, description, category_id, date, type \
             FROM transactions ORDER BY date DESC",
        )?;
        let rows = stmt
            .query_map([], map_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn totals_between(&self, start: i64, end: i64) -> Result<Totals> {
        let totals = self.conn.query_row(
            "SELECT \
                COALESCE(SUM(CASE WHEN type = 'Income' THEN amount ELSE 0 END), 0), \
                COALESCE(SUM(CASE WHEN type = 'Expense' THEN amount ELSE 0 END), 0) \
             FROM transactions WHERE date >= ?1 AND date <= ?2",
            params![start, end],
            |row| {
                Ok(Totals {
                    income: row.get(0)?,
                    expenses: row.get(1)?,
                })
            },
        )?;
        Ok(totals)
    }
}
