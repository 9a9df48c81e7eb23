use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

pub const DB_FILE: &str = "purse.db";

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    type TEXT NOT NULL CHECK (type IN ('Expense', 'Income'))
);

CREATE TABLE IF NOT EXISTS transactions (
    id INTEGER PRIMARY KEY,
    amount REAL NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    category_id INTEGER NOT NULL,
    date INTEGER NOT NULL,
    type TEXT NOT NULL CHECK (type IN ('Expense', 'Income'))
);

CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions (date);
";

// (name, type)
const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    // Expense
    ("Food", "Expense"),
    ("Groceries", "Expense"),
    ("Transport", "Expense"),
    ("Rent", "Expense"),
    ("Utilities", "Expense"),
    ("Shopping", "Expense"),
    ("Entertainment", "Expense"),
    ("Health", "Expense"),
    // Income
    ("Salary", "Income"),
    ("Freelance", "Income"),
    ("Investments", "Income"),
    ("Gifts", "Income"),
];

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    tracing::debug!("opened database at {}", db_path.display());
    Ok(conn)
}

/// Create the schema and seed the default categories on an empty database.
pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;

    let count: i64 = conn.query_row("SELECT count(*) FROM categories", [], |row| row.get(0))?;
    if count == 0 {
        for (name, kind) in DEFAULT_CATEGORIES {
            conn.execute(
                "INSERT INTO categories (name, type) VALUES (?1, ?2)",
                rusqlite::params![name, kind],
            )?;
        }
        tracing::info!("seeded {} default categories", DEFAULT_CATEGORIES.len());
    }
    Ok(())
}

/// Row counts of a ledger database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerCounts {
    pub categories: i64,
    pub transactions: i64,
}

/// True when `conn` holds both ledger tables. Used to vet a database file
/// before pointing settings at it or trusting a backup copy.
pub fn has_ledger_schema(conn: &Connection) -> Result<bool> {
    let found: i64 = conn.query_row(
        "SELECT count(*) FROM sqlite_master
         WHERE type = 'table' AND name IN ('categories', 'transactions')",
        [],
        |row| row.get(0),
    )?;
    Ok(found == 2)
}

pub fn ledger_counts(conn: &Connection) -> Result<LedgerCounts> {
    let categories = conn.query_row("SELECT count(*) FROM categories", [], |r| r.get(0))?;
    let transactions = conn.query_row("SELECT count(*) FROM transactions", [], |r| r.get(0))?;
    Ok(LedgerCounts { categories, transactions })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join(DB_FILE)).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["categories", "transactions"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
        let count: i64 = conn.query_row("SELECT count(*) FROM categories", [], |r| r.get(0)).unwrap();
        assert_eq!(count as usize, DEFAULT_CATEGORIES.len());
    }

    #[test]
    fn test_income_and_expense_categories() {
        let (_dir, conn) = test_db();
        let income: i64 = conn
            .query_row("SELECT count(*) FROM categories WHERE type = 'Income'", [], |r| r.get(0))
            .unwrap();
        let expense: i64 = conn
            .query_row("SELECT count(*) FROM categories WHERE type = 'Expense'", [], |r| r.get(0))
            .unwrap();
        assert_eq!(income, 4);
        assert_eq!(expense, 8);
    }

    #[test]
    fn test_schema_rejects_unknown_type() {
        let (_dir, conn) = test_db();
        let res = conn.execute("INSERT INTO categories (name, type) VALUES ('X', 'Transfer')", []);
        assert!(res.is_err());
    }

    #[test]
    fn test_ledger_schema_detection() {
        let (dir, conn) = test_db();
        assert!(has_ledger_schema(&conn).unwrap());

        let other = Connection::open(dir.path().join("notes.db")).unwrap();
        other.execute_batch("CREATE TABLE notes (body TEXT);").unwrap();
        assert!(!has_ledger_schema(&other).unwrap());

        let empty = Connection::open(dir.path().join("empty.db")).unwrap();
        assert!(!has_ledger_schema(&empty).unwrap());
    }

    #[test]
    fn test_ledger_counts() {
        let (_dir, conn) = test_db();
        conn.execute(
            "INSERT INTO transactions (amount, category_id, date, type) VALUES (5.0, 1, 0, 'Expense')",
            [],
        )
        .unwrap();
        let counts = ledger_counts(&conn).unwrap();
        assert_eq!(counts, LedgerCounts { categories: 12, transactions: 1 });
    }
}
